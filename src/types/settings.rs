use serde::{Deserialize, Serialize};

/// Default quota for durable client storage (5 MiB, the usual browser limit).
pub const DEFAULT_STORAGE_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Top-level client settings, persisted as JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientSettings {
    pub prediction: PredictionSettings,
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            prediction: PredictionSettings::default(),
            storage: StorageSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

/// Where and how predictions are requested.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionSettings {
    pub endpoint: String,
    pub request_timeout_secs: u64,
}

impl Default for PredictionSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:5000/predict".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Durable key/value storage settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageSettings {
    /// `None` disables the quota check.
    pub quota_bytes: Option<usize>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            quota_bytes: Some(DEFAULT_STORAGE_QUOTA_BYTES),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Page colour scheme.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Value stored under the theme key.
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// Parses a stored value. Anything other than `"dark"` is light.
    pub fn from_stored(value: &str) -> Self {
        if value == "dark" {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }
}
