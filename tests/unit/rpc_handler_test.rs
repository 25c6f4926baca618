//! Unit tests for the RPC handler: every JSON-RPC method dispatched by
//! `handle_method`, through the same code path as the `cocoadiag-rpc`
//! binary, with storage and settings in a temporary directory.

use std::fs;
use std::sync::Mutex;

use serde_json::json;
use tempfile::TempDir;
use tokio::runtime::Runtime;

use cocoadiag::app::App;
use cocoadiag::rpc_handler::handle_method;

/// Create a fresh App with its database and settings under a temp directory.
fn setup() -> (Mutex<App>, Runtime, TempDir) {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let settings_path = tmp.path().join("settings.json").to_string_lossy().to_string();
    let app = App::new(tmp.path(), Some(settings_path)).expect("Failed to init App");
    let rt = Runtime::new().expect("Failed to build runtime");
    (Mutex::new(app), rt, tmp)
}

fn record_json(n: usize) -> serde_json::Value {
    json!({
        "date": format!("2026-10-15 09:{:02}:00", n),
        "image": "data:image/png;base64,AAAA",
        "result": {
            "disease": "CSSVD",
            "confidence": format!("{}.50%", 60 + n),
            "recommendation": "Remove the infected tree <a href=\"/cssvd\">more</a>"
        }
    })
}

// ─── Ping ───

#[test]
fn test_ping() {
    let (app, rt, _tmp) = setup();
    let res = handle_method(&app, &rt, "ping", &json!({})).unwrap();
    assert_eq!(res, json!({"pong": true}));
}

// ─── Unknown method ───

#[test]
fn test_unknown_method_returns_error() {
    let (app, rt, _tmp) = setup();
    let err = handle_method(&app, &rt, "nonexistent.method", &json!({})).unwrap_err();
    assert_eq!(err, "unknown method: nonexistent.method");
}

// ─── History ───

#[test]
fn test_history_empty_render() {
    let (app, rt, _tmp) = setup();
    let res = handle_method(&app, &rt, "history.render", &json!({})).unwrap();
    assert_eq!(res["count"], 0);
    assert_eq!(res["html"], "<p>No previous diagnoses found.</p>");

    let list = handle_method(&app, &rt, "history.list", &json!({})).unwrap();
    assert_eq!(list["items"], json!([]));
}

#[test]
fn test_history_append_list_and_render() {
    let (app, rt, _tmp) = setup();
    for n in 0..12 {
        let res = handle_method(&app, &rt, "history.append", &json!({"record": record_json(n)}))
            .unwrap();
        assert_eq!(res["ok"], true);
    }

    let list = handle_method(&app, &rt, "history.list", &json!({})).unwrap();
    let items = list["items"].as_array().unwrap();
    assert_eq!(items.len(), 10);
    assert_eq!(items[0]["date"], "2026-10-15 09:11:00");
    assert_eq!(items[9]["date"], "2026-10-15 09:02:00");

    let render = handle_method(&app, &rt, "history.render", &json!({})).unwrap();
    assert_eq!(render["count"], 10);
    let html = render["html"].as_str().unwrap();
    assert_eq!(html.matches("history-entry").count(), 10);
    assert!(html.contains("<a href=\"/cssvd\">more</a>"));
}

#[test]
fn test_history_append_rejects_bad_params() {
    let (app, rt, _tmp) = setup();
    let err = handle_method(&app, &rt, "history.append", &json!({})).unwrap_err();
    assert_eq!(err, "missing record");

    let err = handle_method(&app, &rt, "history.append", &json!({"record": {"date": "x"}}))
        .unwrap_err();
    assert!(err.starts_with("invalid record"));
}

#[test]
fn test_history_toggle_renders_when_shown() {
    let (app, rt, _tmp) = setup();
    handle_method(&app, &rt, "history.append", &json!({"record": record_json(1)})).unwrap();

    let shown = handle_method(&app, &rt, "history.toggle", &json!({})).unwrap();
    assert_eq!(shown["visible"], true);
    assert!(shown["html"].as_str().unwrap().contains("CSSVD"));

    let hidden = handle_method(&app, &rt, "history.toggle", &json!({})).unwrap();
    assert_eq!(hidden["visible"], false);
}

// ─── Theme ───

#[test]
fn test_theme_set_get_toggle() {
    let (app, rt, _tmp) = setup();
    let res = handle_method(&app, &rt, "theme.get", &json!({})).unwrap();
    assert_eq!(res["theme"], "light");
    assert!(res["body_class"].is_null());

    let res = handle_method(&app, &rt, "theme.set", &json!({"theme": "dark"})).unwrap();
    assert_eq!(res["theme"], "dark");
    assert_eq!(res["body_class"], "dark");
    assert!(res["notice"].is_null());

    let res = handle_method(&app, &rt, "theme.toggle", &json!({})).unwrap();
    assert_eq!(res["theme"], "light");
}

#[test]
fn test_theme_set_rejects_unknown_value() {
    let (app, rt, _tmp) = setup();
    let err = handle_method(&app, &rt, "theme.set", &json!({"theme": "sepia"})).unwrap_err();
    assert_eq!(err, "invalid theme: sepia");
    let err = handle_method(&app, &rt, "theme.set", &json!({})).unwrap_err();
    assert_eq!(err, "missing theme");
}

#[test]
fn test_theme_persists_across_app_instances() {
    let tmp = TempDir::new().unwrap();
    let settings = tmp.path().join("settings.json").to_string_lossy().to_string();
    let rt = Runtime::new().unwrap();
    {
        let app = Mutex::new(App::new(tmp.path(), Some(settings.clone())).unwrap());
        handle_method(&app, &rt, "theme.set", &json!({"theme": "dark"})).unwrap();
    }
    let app = Mutex::new(App::new(tmp.path(), Some(settings)).unwrap());
    let res = handle_method(&app, &rt, "theme.get", &json!({})).unwrap();
    assert_eq!(res["theme"], "dark");
}

// ─── Navigation menu ───

#[test]
fn test_menu_toggle_and_click() {
    let (app, rt, _tmp) = setup();
    let res = handle_method(&app, &rt, "menu.toggle", &json!({})).unwrap();
    assert_eq!(res["open"], true);

    let res = handle_method(&app, &rt, "menu.click", &json!({"target": "menu"})).unwrap();
    assert_eq!(res["open"], true);

    let res = handle_method(&app, &rt, "menu.click", &json!({"target": "outside"})).unwrap();
    assert_eq!(res["open"], false);

    let err = handle_method(&app, &rt, "menu.click", &json!({"target": "footer"})).unwrap_err();
    assert_eq!(err, "invalid click target: footer");
}

// ─── Image selection and diagnosis ───

#[test]
fn test_image_select_returns_preview() {
    let (app, rt, tmp) = setup();
    let path = tmp.path().join("leaf.png");
    fs::write(&path, b"abc").unwrap();

    let res = handle_method(
        &app,
        &rt,
        "image.select",
        &json!({"source": "upload", "path": path.to_string_lossy()}),
    )
    .unwrap();
    assert_eq!(res["preview"], "data:image/png;base64,YWJj");

    let res = handle_method(&app, &rt, "image.select", &json!({"source": "upload"})).unwrap();
    assert!(res["preview"].is_null());

    let err = handle_method(&app, &rt, "image.select", &json!({"source": "scanner"})).unwrap_err();
    assert_eq!(err, "invalid source: scanner");
}

#[test]
fn test_submit_without_image() {
    let (app, rt, _tmp) = setup();
    let err = handle_method(&app, &rt, "diagnosis.submit", &json!({})).unwrap_err();
    assert_eq!(err, "Please upload an image or take a photo first.");
}

#[test]
fn test_submit_with_unreachable_service() {
    let (app, rt, tmp) = setup();
    handle_method(
        &app,
        &rt,
        "settings.set",
        &json!({"key": "prediction.endpoint", "value": "http://127.0.0.1:1/predict"}),
    )
    .unwrap();

    let path = tmp.path().join("pod.jpg");
    fs::write(&path, b"jpeg").unwrap();
    handle_method(
        &app,
        &rt,
        "image.select",
        &json!({"source": "camera", "path": path.to_string_lossy()}),
    )
    .unwrap();

    let err = handle_method(&app, &rt, "diagnosis.submit", &json!({})).unwrap_err();
    assert_eq!(err, "Something went wrong. Please try again.");

    let list = handle_method(&app, &rt, "history.list", &json!({})).unwrap();
    assert_eq!(list["items"], json!([]));
}

// ─── Settings ───

#[test]
fn test_settings_get_set_reset() {
    let (app, rt, _tmp) = setup();
    let res = handle_method(&app, &rt, "settings.get", &json!({})).unwrap();
    assert_eq!(res["prediction"]["endpoint"], "http://127.0.0.1:5000/predict");

    handle_method(
        &app,
        &rt,
        "settings.set",
        &json!({"key": "prediction.endpoint", "value": "http://10.0.0.5:5000/predict"}),
    )
    .unwrap();
    assert_eq!(
        app.lock().unwrap().diagnosis.predictor().endpoint(),
        "http://10.0.0.5:5000/predict"
    );

    let err = handle_method(
        &app,
        &rt,
        "settings.set",
        &json!({"key": "prediction.bogus", "value": 1}),
    )
    .unwrap_err();
    assert!(err.contains("not found"));

    handle_method(&app, &rt, "settings.reset", &json!({})).unwrap();
    let res = handle_method(&app, &rt, "settings.get", &json!({})).unwrap();
    assert_eq!(res["prediction"]["endpoint"], "http://127.0.0.1:5000/predict");
    assert_eq!(
        app.lock().unwrap().diagnosis.predictor().endpoint(),
        "http://127.0.0.1:5000/predict"
    );
}

#[test]
fn test_settings_quota_change_applies_to_running_app() {
    let (app, rt, _tmp) = setup();

    handle_method(
        &app,
        &rt,
        "settings.set",
        &json!({"key": "storage.quota_bytes", "value": 64}),
    )
    .unwrap();
    let res = handle_method(&app, &rt, "history.append", &json!({"record": record_json(1)}))
        .unwrap();
    assert_eq!(res["ok"], false);
    assert!(res["notice"].as_str().unwrap().contains("quota"));

    handle_method(
        &app,
        &rt,
        "settings.set",
        &json!({"key": "storage.quota_bytes", "value": null}),
    )
    .unwrap();
    assert_eq!(app.lock().unwrap().storage.quota(), None);
    let res = handle_method(&app, &rt, "history.append", &json!({"record": record_json(1)}))
        .unwrap();
    assert_eq!(res["ok"], true);
}

#[test]
fn test_settings_log_level_reports_restart() {
    let (app, rt, _tmp) = setup();
    let res = handle_method(
        &app,
        &rt,
        "settings.set",
        &json!({"key": "logging.level", "value": "debug"}),
    )
    .unwrap();
    assert_eq!(res["restart_required"], true);

    let res = handle_method(
        &app,
        &rt,
        "settings.set",
        &json!({"key": "prediction.request_timeout_secs", "value": 10}),
    )
    .unwrap();
    assert_eq!(res["restart_required"], false);
}
