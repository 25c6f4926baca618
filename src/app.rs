//! App Core for cocoadiag.
//!
//! Central struct wiring storage, the history store, theme, settings, the
//! prediction service, and the page-side UI state.

use std::fs;
use std::path::Path;
use std::rc::Rc;

use crate::managers::history_manager::HistoryManager;
use crate::services::diagnosis_service::{DiagnosisService, SubmissionOutcome};
use crate::services::prediction_client::HttpPredictor;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::services::theme_engine::ThemeEngine;
use crate::storage::SqliteStore;
use crate::types::errors::{PredictionError, SubmitError};
use crate::ui::history_view::{BufferedView, HistoryPanel};
use crate::ui::image_form::ImageForm;
use crate::ui::nav_menu::NavMenu;

/// File name of the storage database inside the data directory.
pub const STORAGE_DB_FILE: &str = "cocoadiag.db";

/// Central application struct holding the store, services, and UI state.
///
/// The history store and theme engine share one storage handle, the same
/// way page scripts share one local storage.
pub struct App {
    pub storage: Rc<SqliteStore>,
    pub history: HistoryManager<Rc<SqliteStore>>,
    pub theme_engine: ThemeEngine<Rc<SqliteStore>>,
    pub settings_engine: SettingsEngine,
    pub diagnosis: DiagnosisService<HttpPredictor>,
    pub image_form: ImageForm,
    pub history_panel: HistoryPanel,
    pub history_view: BufferedView,
    pub nav_menu: NavMenu,
}

impl App {
    /// Creates a new App with storage under `data_dir`.
    ///
    /// `settings_path` overrides the settings file location. A malformed
    /// settings file is logged and defaults are used.
    pub fn new(
        data_dir: &Path,
        settings_path: Option<String>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut settings_engine = SettingsEngine::new(settings_path);
        if let Err(e) = settings_engine.load() {
            tracing::warn!(error = %e, path = settings_engine.get_config_path(), "Using default settings");
        }
        let settings = settings_engine.get_settings().clone();

        fs::create_dir_all(data_dir)?;
        let storage = Rc::new(SqliteStore::open(
            data_dir.join(STORAGE_DB_FILE),
            settings.storage.quota_bytes,
        )?);

        let history = HistoryManager::new(Rc::clone(&storage));
        let theme_engine = ThemeEngine::new(Rc::clone(&storage));
        let diagnosis = DiagnosisService::new(HttpPredictor::from_settings(&settings.prediction)?);

        tracing::info!(
            data_dir = %data_dir.display(),
            endpoint = %settings.prediction.endpoint,
            "App initialised"
        );

        Ok(Self {
            storage,
            history,
            theme_engine,
            settings_engine,
            diagnosis,
            image_form: ImageForm::new(),
            history_panel: HistoryPanel::new(),
            history_view: BufferedView::default(),
            nav_menu: NavMenu::new(),
        })
    }

    /// Applies the current settings to the running app: rebuilds the
    /// prediction client and updates the storage quota. The log level is
    /// read at startup only.
    pub fn apply_settings(&mut self) -> Result<(), PredictionError> {
        let settings = self.settings_engine.get_settings();
        self.diagnosis = DiagnosisService::new(HttpPredictor::from_settings(&settings.prediction)?);
        self.storage.set_quota(settings.storage.quota_bytes);
        Ok(())
    }

    /// Submits the currently selected image.
    pub async fn submit(&mut self) -> Result<SubmissionOutcome, SubmitError> {
        self.diagnosis
            .submit(&self.image_form, &mut self.history, &mut self.history_view)
            .await
    }

    /// Shows or hides the history panel; returns the new visibility.
    pub fn toggle_history(&mut self) -> bool {
        self.history_panel
            .toggle_visibility(&self.history, &mut self.history_view)
    }
}
