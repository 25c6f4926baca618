//! Prediction client for the remote diagnosis endpoint.
//!
//! Sends one image as multipart field `image` and decodes either
//! `{ predicted_class, confidence, recommendation }` or `{ error }`.

use std::time::Duration;

use reqwest::multipart::{Form, Part};

use crate::types::errors::PredictionError;
use crate::types::prediction::{ImageUpload, PredictionErrorBody, PredictionResponse};
use crate::types::settings::PredictionSettings;

/// Anything that can turn an image into a prediction.
#[allow(async_fn_in_trait)]
pub trait Predictor {
    async fn predict(&self, image: &ImageUpload) -> Result<PredictionResponse, PredictionError>;
}

/// HTTP predictor backed by `reqwest`.
pub struct HttpPredictor {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpPredictor {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, PredictionError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PredictionError::Network(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn from_settings(settings: &PredictionSettings) -> Result<Self, PredictionError> {
        Self::new(
            &settings.endpoint,
            Duration::from_secs(settings.request_timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Decodes a response body given its HTTP status.
pub fn parse_response(status: u16, body: &str) -> Result<PredictionResponse, PredictionError> {
    if !(200..300).contains(&status) {
        let message = match serde_json::from_str::<PredictionErrorBody>(body) {
            Ok(err) => err.error,
            Err(_) if body.trim().is_empty() => "empty response body".to_string(),
            Err(_) => body.trim().to_string(),
        };
        return Err(PredictionError::Server { status, message });
    }

    serde_json::from_str(body).map_err(|e| PredictionError::InvalidResponse(e.to_string()))
}

impl Predictor for HttpPredictor {
    async fn predict(&self, image: &ImageUpload) -> Result<PredictionResponse, PredictionError> {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime_type)
            .map_err(|e| PredictionError::Network(format!("Failed to build request: {}", e)))?;
        let form = Form::new().part("image", part);

        tracing::info!(
            endpoint = %self.endpoint,
            file = %image.file_name,
            bytes = image.bytes.len(),
            "Requesting prediction"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| PredictionError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| PredictionError::Network(e.to_string()))?;

        let parsed = parse_response(status, &body);
        match &parsed {
            Ok(p) => tracing::info!(class = %p.predicted_class, confidence = %p.confidence, "Prediction received"),
            Err(e) => tracing::warn!(error = %e, "Prediction failed"),
        }
        parsed
    }
}
