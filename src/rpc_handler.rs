//! RPC method handler for the cocoadiag JSON-RPC protocol.
//!
//! The `handle_method` function dispatches JSON-RPC method calls from the
//! embedding page to the `App`. It lives outside `rpc_server.rs` so it can
//! be tested without stdin/stdout.

use std::path::Path;
use std::sync::Mutex;

use serde_json::{json, Value};
use tokio::runtime::Runtime;

use crate::app::App;
use crate::managers::history_manager::{render_log, HistoryManagerTrait};
use crate::services::settings_engine::SettingsEngineTrait;
use crate::services::theme_engine::ThemeEngineTrait;
use crate::types::diagnosis::DiagnosisRecord;
use crate::types::settings::ThemeMode;
use crate::ui::history_view::history_html;
use crate::ui::image_form::ImageSource;
use crate::ui::nav_menu::ClickTarget;

fn theme_json(app: &App) -> Value {
    json!({
        "theme": app.theme_engine.get_theme().as_str(),
        "body_class": app.theme_engine.body_class(),
    })
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// `rt` drives the one async call (`diagnosis.submit`). Returns `Ok(Value)`
/// on success or `Err(String)` with a message suitable for the page.
pub fn handle_method(
    app: &Mutex<App>,
    rt: &Runtime,
    method: &str,
    params: &Value,
) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── History ───
        "history.list" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let log = a.history.load_log();
            Ok(json!({"items": log.records()}))
        }
        "history.render" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let log = a.history.load_log();
            let html = history_html(&render_log(&log));
            Ok(json!({"html": html, "count": log.len()}))
        }
        "history.append" => {
            let record = params.get("record").cloned().ok_or("missing record")?;
            let record: DiagnosisRecord =
                serde_json::from_value(record).map_err(|e| format!("invalid record: {}", e))?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            match a.history.append(record) {
                Ok(()) => Ok(json!({"ok": true})),
                Err(e) => {
                    tracing::warn!(error = %e, "history.append not persisted");
                    Ok(json!({"ok": false, "notice": e.to_string()}))
                }
            }
        }
        "history.toggle" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let visible = a.toggle_history();
            Ok(json!({"visible": visible, "html": a.history_view.markup}))
        }

        // ─── Theme ───
        "theme.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            Ok(theme_json(&a))
        }
        "theme.set" => {
            let mode = match params.get("theme").and_then(|v| v.as_str()) {
                Some("light") => ThemeMode::Light,
                Some("dark") => ThemeMode::Dark,
                Some(other) => return Err(format!("invalid theme: {}", other)),
                None => return Err("missing theme".to_string()),
            };
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let notice = a.theme_engine.set_theme(mode).err().map(|e| e.to_string());
            let mut res = theme_json(&a);
            res["notice"] = json!(notice);
            Ok(res)
        }
        "theme.toggle" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let notice = a.theme_engine.toggle().err().map(|e| e.to_string());
            let mut res = theme_json(&a);
            res["notice"] = json!(notice);
            Ok(res)
        }

        // ─── Navigation menu ───
        "menu.toggle" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            Ok(json!({"open": a.nav_menu.toggle()}))
        }
        "menu.click" => {
            let target = match params.get("target").and_then(|v| v.as_str()) {
                Some("hamburger") => ClickTarget::Hamburger,
                Some("link") => ClickTarget::MenuLink,
                Some("menu") => ClickTarget::MenuBody,
                Some("outside") => ClickTarget::Outside,
                Some(other) => return Err(format!("invalid click target: {}", other)),
                None => return Err("missing target".to_string()),
            };
            let mut a = app.lock().map_err(|e| e.to_string())?;
            Ok(json!({"open": a.nav_menu.click(target)}))
        }

        // ─── Image selection ───
        "image.select" => {
            let source = params
                .get("source")
                .and_then(|v| v.as_str())
                .ok_or("missing source")?;
            let source = ImageSource::parse(source)
                .ok_or_else(|| format!("invalid source: {}", source))?;
            let path = params.get("path").and_then(|v| v.as_str()).map(Path::new);
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let preview = a
                .image_form
                .select(source, path)
                .map_err(|e| e.to_string())?;
            Ok(json!({"preview": preview}))
        }

        // ─── Diagnosis ───
        "diagnosis.submit" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let outcome = rt.block_on(a.submit()).map_err(|e| e.user_message().to_string())?;
            Ok(json!({
                "date": outcome.record.date,
                "result": outcome.record.result,
                "notices": outcome.notices,
                "history_html": a.history_view.markup,
            }))
        }

        // ─── Settings ───
        "settings.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            serde_json::to_value(a.settings_engine.get_settings()).map_err(|e| e.to_string())
        }
        "settings.set" => {
            let key = params.get("key").and_then(|v| v.as_str()).ok_or("missing key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.settings_engine.set_value(key, value).map_err(|e| e.to_string())?;
            a.apply_settings().map_err(|e| e.to_string())?;
            // the log filter is installed once at startup
            Ok(json!({"ok": true, "restart_required": key.starts_with("logging.")}))
        }
        "settings.reset" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.settings_engine.reset().map_err(|e| e.to_string())?;
            a.apply_settings().map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
