//! Diagnosis submission flow.
//!
//! Takes the selected image, asks the predictor for a result, records it in
//! history, and refreshes the history view. A history write failure does
//! not fail the submission; it comes back as a [`Notice`].

use serde::Serialize;

use crate::managers::history_manager::HistoryManagerTrait;
use crate::services::prediction_client::Predictor;
use crate::types::diagnosis::{DiagnosisRecord, DiagnosisResult};
use crate::types::errors::SubmitError;
use crate::ui::history_view::{refresh, HistoryView};
use crate::ui::image_form::{data_uri, ImageForm};

/// A non-fatal problem to show the user alongside a successful result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub message: String,
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionOutcome {
    pub record: DiagnosisRecord,
    pub notices: Vec<Notice>,
}

impl SubmissionOutcome {
    pub fn result(&self) -> &DiagnosisResult {
        &self.record.result
    }
}

/// Human-readable local timestamp used for new records.
pub fn local_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

pub struct DiagnosisService<P: Predictor> {
    predictor: P,
}

impl<P: Predictor> DiagnosisService<P> {
    pub fn new(predictor: P) -> Self {
        Self { predictor }
    }

    pub fn predictor(&self) -> &P {
        &self.predictor
    }

    /// Submits the selected image and records the outcome.
    ///
    /// # Errors
    /// `SubmitError::NoImage` when neither input holds an image, and
    /// `SubmitError::Prediction` when the service call fails. History is
    /// left untouched in both cases.
    pub async fn submit<H, V>(
        &self,
        form: &ImageForm,
        history: &mut H,
        view: &mut V,
    ) -> Result<SubmissionOutcome, SubmitError>
    where
        H: HistoryManagerTrait,
        V: HistoryView,
    {
        let image = form.selected().ok_or(SubmitError::NoImage)?;

        let response = self.predictor.predict(image).await.map_err(|e| {
            tracing::error!(error = %e, file = %image.file_name, "Diagnosis request failed");
            SubmitError::Prediction(e)
        })?;

        let record = DiagnosisRecord {
            date: local_timestamp(),
            image: form
                .preview()
                .map(str::to_string)
                .unwrap_or_else(|| data_uri(&image.mime_type, &image.bytes)),
            result: response.into_result(),
        };

        let mut notices = Vec::new();
        if let Err(e) = history.append(record.clone()) {
            tracing::warn!(error = %e, "Diagnosis not saved to history");
            notices.push(Notice {
                message: format!("Result could not be saved to history: {}", e),
            });
        }
        refresh(history, view);

        tracing::info!(disease = %record.result.disease, "Diagnosis complete");
        Ok(SubmissionOutcome { record, notices })
    }
}
