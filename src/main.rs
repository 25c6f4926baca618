//! cocoadiag: command-line client for the cocoa diagnosis service.
//!
//! Submits an image for diagnosis, prints the stored history, and reads or
//! changes the theme preference shared with the embedding page.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use cocoadiag::app::App;
use cocoadiag::logging;
use cocoadiag::managers::history_manager::{HistoryManagerTrait, RenderedHistory};
use cocoadiag::platform;
use cocoadiag::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use cocoadiag::services::theme_engine::ThemeEngineTrait;
use cocoadiag::types::settings::ThemeMode;
use cocoadiag::ui::history_view::history_html;
use cocoadiag::ui::image_form::ImageSource;

#[derive(Parser, Debug)]
#[command(name = "cocoadiag", version, about)]
struct Cli {
    /// Data directory holding the storage database.
    #[arg(long = "data-dir")]
    data_dir: Option<PathBuf>,

    /// Settings file (defaults to the platform config directory).
    #[arg(long = "config")]
    config: Option<String>,

    /// Enable debug logging.
    #[arg(short = 'd', long = "debug")]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit an image for diagnosis and record the result.
    Diagnose {
        image: PathBuf,
        /// Treat the image as a camera capture rather than an upload.
        #[arg(long)]
        camera: bool,
    },
    /// Show the stored diagnosis history.
    History {
        /// Print the rendered page markup instead of plain text.
        #[arg(long)]
        html: bool,
    },
    /// Show or change the theme: light, dark, or toggle.
    Theme { value: Option<String> },
}

fn print_history(rendered: &RenderedHistory) {
    match rendered {
        RenderedHistory::Empty => println!("No previous diagnoses found."),
        RenderedHistory::Entries(blocks) => {
            for block in blocks {
                println!("Date:           {}", block.date);
                println!("Image:          {} bytes (data URI)", block.image.len());
                println!("Disease:        {}", block.disease);
                println!("Confidence:     {}", block.confidence);
                println!("Recommendation: {}", block.recommendation);
                println!("---");
            }
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = cli.data_dir.unwrap_or_else(platform::get_data_dir);
    let mut app = App::new(&data_dir, cli.config)?;

    match cli.command {
        Command::Diagnose { image, camera } => {
            let source = if camera {
                ImageSource::Camera
            } else {
                ImageSource::Upload
            };
            app.image_form.select(source, Some(image.as_path()))?;

            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            match rt.block_on(app.submit()) {
                Ok(outcome) => {
                    let result = outcome.result();
                    println!("Disease:        {}", result.disease);
                    println!("Confidence:     {}", result.confidence);
                    println!("Recommendation: {}", result.recommendation);
                    for notice in &outcome.notices {
                        eprintln!("warning: {}", notice.message);
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "Diagnosis failed");
                    return Err(e.user_message().into());
                }
            }
        }
        Command::History { html } => {
            let rendered = app.history.render();
            if html {
                println!("{}", history_html(&rendered));
            } else {
                print_history(&rendered);
            }
        }
        Command::Theme { value } => {
            let result = match value.as_deref() {
                None => Ok(()),
                Some("light") => app.theme_engine.set_theme(ThemeMode::Light),
                Some("dark") => app.theme_engine.set_theme(ThemeMode::Dark),
                Some("toggle") => app.theme_engine.toggle().map(|_| ()),
                Some(other) => return Err(format!("invalid theme: {}", other).into()),
            };
            if let Err(e) = result {
                eprintln!("warning: {}", e);
            }
            println!("{}", app.theme_engine.get_theme().as_str());
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = SettingsEngine::new(cli.config.clone())
        .load()
        .ok()
        .map(|s| s.logging.level);
    logging::init(cli.debug, level.as_deref());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
