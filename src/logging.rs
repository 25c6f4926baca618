// cocoadiag - logging.rs
//
// Structured logging via tracing. Output goes to stderr so the RPC
// binary's stdout carries protocol lines only.
//
// Priority: RUST_LOG env var > --debug flag > settings level > "info".

use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Initialise the logging subsystem. Safe to call more than once; later
/// calls are ignored.
pub fn init(debug_flag: bool, config_level: Option<&str>) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if debug_flag {
        EnvFilter::new("debug")
    } else if let Some(level) = config_level {
        EnvFilter::new(level)
    } else {
        EnvFilter::new(DEFAULT_LOG_LEVEL)
    };

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .try_init();

    if result.is_ok() {
        tracing::debug!(
            app = env!("CARGO_PKG_NAME"),
            version = env!("CARGO_PKG_VERSION"),
            "Logging initialised"
        );
    }
}
