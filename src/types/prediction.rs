use serde::{Deserialize, Serialize};

use super::diagnosis::{Confidence, DiagnosisResult};

/// Successful body returned by the prediction endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionResponse {
    pub predicted_class: String,
    pub confidence: Confidence,
    pub recommendation: String,
}

impl PredictionResponse {
    /// Converts the service response into the stored result triple.
    pub fn into_result(self) -> DiagnosisResult {
        DiagnosisResult {
            disease: self.predicted_class,
            confidence: self.confidence,
            recommendation: self.recommendation,
        }
    }
}

/// Error body returned by the prediction endpoint on 4xx/5xx.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionErrorBody {
    pub error: String,
}

/// An image ready to be sent for prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}
