//! Theme Engine: light/dark preference persisted in client storage.

use crate::storage::KeyValueStore;
use crate::types::errors::ThemeError;
use crate::types::settings::ThemeMode;

/// Storage key holding `"light"` or `"dark"`.
pub const THEME_KEY: &str = "theme";

/// Trait defining the theme engine interface.
pub trait ThemeEngineTrait {
    fn get_theme(&self) -> ThemeMode;
    fn set_theme(&mut self, mode: ThemeMode) -> Result<(), ThemeError>;
    fn toggle(&mut self) -> Result<ThemeMode, ThemeError>;
    fn body_class(&self) -> Option<&'static str>;
}

pub struct ThemeEngine<S: KeyValueStore> {
    storage: S,
    current_theme: ThemeMode,
}

impl<S: KeyValueStore> ThemeEngine<S> {
    /// Creates the engine, restoring the stored preference (light when absent).
    pub fn new(storage: S) -> Self {
        let current_theme = match storage.get_item(THEME_KEY) {
            Ok(Some(value)) => ThemeMode::from_stored(&value),
            Ok(None) => ThemeMode::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Theme read failed; using light");
                ThemeMode::default()
            }
        };
        Self {
            storage,
            current_theme,
        }
    }
}

impl<S: KeyValueStore> ThemeEngineTrait for ThemeEngine<S> {
    fn get_theme(&self) -> ThemeMode {
        self.current_theme
    }

    /// Applies `mode` immediately and persists it. A failed write is
    /// returned but the in-memory mode has already changed.
    fn set_theme(&mut self, mode: ThemeMode) -> Result<(), ThemeError> {
        self.current_theme = mode;
        self.storage
            .set_item(THEME_KEY, mode.as_str())
            .map_err(ThemeError::PersistFailed)
    }

    fn toggle(&mut self) -> Result<ThemeMode, ThemeError> {
        let next = match self.current_theme {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        };
        self.set_theme(next)?;
        Ok(next)
    }

    /// CSS class to put on `<body>`.
    fn body_class(&self) -> Option<&'static str> {
        match self.current_theme {
            ThemeMode::Dark => Some("dark"),
            ThemeMode::Light => None,
        }
    }
}
