//! cocoadiag RPC Server: JSON-RPC over stdin/stdout for an embedding page.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"history.render", "params":{}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}

use std::io::{self, BufRead, Write};
use std::sync::Mutex;

use cocoadiag::app::App;
use cocoadiag::logging;
use cocoadiag::platform;
use cocoadiag::rpc_handler::handle_method;
use cocoadiag::services::settings_engine::{SettingsEngine, SettingsEngineTrait};

use serde_json::{json, Value};

fn write_line(out: &mut impl Write, value: &Value) -> io::Result<()> {
    writeln!(out, "{}", value)?;
    out.flush()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let level = SettingsEngine::new(None).load().ok().map(|s| s.logging.level);
    logging::init(std::env::var("COCOADIAG_DEBUG").is_ok(), level.as_deref());

    let data_dir = platform::get_data_dir();
    let app = Mutex::new(App::new(&data_dir, None)?);
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_line(
        &mut out,
        &json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")}),
    )?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                tracing::error!(error = %e, "stdin read failed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                write_line(&mut out, &json!({"id": null, "error": format!("parse error: {}", e)}))?;
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);
        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));

        tracing::debug!(method, "RPC request");
        let response = match handle_method(&app, &rt, method, &params) {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => json!({"id": id, "error": err}),
        };
        write_line(&mut out, &response)?;
    }

    Ok(())
}
