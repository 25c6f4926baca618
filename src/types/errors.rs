use std::fmt;

// === StorageError ===

/// Errors raised by a key/value storage backend.
#[derive(Debug)]
pub enum StorageError {
    /// Writing the value would push the store past its byte quota.
    QuotaExceeded { key: String, needed: usize, quota: usize },
    /// The underlying database failed.
    DatabaseError(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::QuotaExceeded { key, needed, quota } => write!(
                f,
                "Storage quota exceeded writing '{}': {} bytes needed, quota is {} bytes",
                key, needed, quota
            ),
            StorageError::DatabaseError(msg) => write!(f, "Storage database error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

// === HistoryError ===

/// Errors related to the diagnosis history log.
#[derive(Debug)]
pub enum HistoryError {
    /// The log could not be serialized for writing.
    SerializationError(String),
    /// The storage backend rejected the write.
    WriteFailed(StorageError),
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::SerializationError(msg) => {
                write!(f, "History serialization error: {}", msg)
            }
            HistoryError::WriteFailed(err) => write!(f, "History write failed: {}", err),
        }
    }
}

impl std::error::Error for HistoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HistoryError::WriteFailed(err) => Some(err),
            HistoryError::SerializationError(_) => None,
        }
    }
}

// === ThemeError ===

/// Errors related to persisting the theme preference.
#[derive(Debug)]
pub enum ThemeError {
    /// The preference could not be written to storage.
    PersistFailed(StorageError),
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeError::PersistFailed(err) => write!(f, "Theme persist failed: {}", err),
        }
    }
}

impl std::error::Error for ThemeError {}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

// === PredictionError ===

/// Errors returned while calling the remote prediction service.
#[derive(Debug)]
pub enum PredictionError {
    /// The request never produced an HTTP response.
    Network(String),
    /// The service answered with a non-success status.
    Server { status: u16, message: String },
    /// The response body did not have the expected shape.
    InvalidResponse(String),
}

impl fmt::Display for PredictionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictionError::Network(msg) => write!(f, "Prediction network error: {}", msg),
            PredictionError::Server { status, message } => {
                write!(f, "Prediction service error ({}): {}", status, message)
            }
            PredictionError::InvalidResponse(msg) => {
                write!(f, "Invalid prediction response: {}", msg)
            }
        }
    }
}

impl std::error::Error for PredictionError {}

// === ImageError ===

/// Errors related to reading a selected image.
#[derive(Debug)]
pub enum ImageError {
    /// The image file could not be read.
    ReadFailed { path: String, reason: String },
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::ReadFailed { path, reason } => {
                write!(f, "Failed to read image {}: {}", path, reason)
            }
        }
    }
}

impl std::error::Error for ImageError {}

// === SubmitError ===

/// Errors that abort a diagnosis submission.
#[derive(Debug)]
pub enum SubmitError {
    /// Neither the upload nor the camera input holds an image.
    NoImage,
    /// The prediction call failed.
    Prediction(PredictionError),
}

impl SubmitError {
    /// Short message suitable for showing to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            SubmitError::NoImage => "Please upload an image or take a photo first.",
            SubmitError::Prediction(_) => "Something went wrong. Please try again.",
        }
    }
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::NoImage => write!(f, "No image selected"),
            SubmitError::Prediction(err) => write!(f, "Submission failed: {}", err),
        }
    }
}

impl std::error::Error for SubmitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SubmitError::Prediction(err) => Some(err),
            SubmitError::NoImage => None,
        }
    }
}
