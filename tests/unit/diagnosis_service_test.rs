//! Tests for the diagnosis submission flow using a canned predictor.

use std::cell::Cell;
use std::fs;
use std::rc::Rc;

use tempfile::TempDir;

use cocoadiag::managers::history_manager::{HistoryManager, HistoryManagerTrait};
use cocoadiag::services::diagnosis_service::DiagnosisService;
use cocoadiag::services::prediction_client::Predictor;
use cocoadiag::storage::MemoryStore;
use cocoadiag::types::diagnosis::Confidence;
use cocoadiag::types::errors::{PredictionError, SubmitError};
use cocoadiag::types::prediction::{ImageUpload, PredictionResponse};
use cocoadiag::ui::history_view::{BufferedView, EMPTY_HISTORY_HTML};
use cocoadiag::ui::image_form::{ImageForm, ImageSource};

/// Returns `response` when set, otherwise a 500 from the service.
struct CannedPredictor {
    response: Option<PredictionResponse>,
    calls: Cell<usize>,
}

impl CannedPredictor {
    fn ok() -> Self {
        Self {
            response: Some(PredictionResponse {
                predicted_class: "ANTHRACNOSE".to_string(),
                confidence: Confidence::from("93.02%"),
                recommendation: "Prune and apply copper fungicide".to_string(),
            }),
            calls: Cell::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            response: None,
            calls: Cell::new(0),
        }
    }
}

impl Predictor for CannedPredictor {
    async fn predict(&self, _image: &ImageUpload) -> Result<PredictionResponse, PredictionError> {
        self.calls.set(self.calls.get() + 1);
        self.response.clone().ok_or_else(|| PredictionError::Server {
            status: 500,
            message: "model unavailable".to_string(),
        })
    }
}

fn form_with_image(dir: &TempDir) -> ImageForm {
    let path = dir.path().join("pod.png");
    fs::write(&path, b"png-bytes").unwrap();
    let mut form = ImageForm::new();
    form.select(ImageSource::Camera, Some(path.as_path())).unwrap();
    form
}

#[tokio::test]
async fn test_submit_without_image_is_rejected() {
    let service = DiagnosisService::new(CannedPredictor::ok());
    let store = Rc::new(MemoryStore::new());
    let mut history = HistoryManager::new(Rc::clone(&store));
    let mut view = BufferedView::default();

    let err = service
        .submit(&ImageForm::new(), &mut history, &mut view)
        .await
        .unwrap_err();

    assert!(matches!(err, SubmitError::NoImage));
    assert_eq!(err.user_message(), "Please upload an image or take a photo first.");
    assert_eq!(service.predictor().calls.get(), 0);
    assert!(store.is_empty());
    assert_eq!(view.writes, 0);
}

#[tokio::test]
async fn test_prediction_failure_leaves_history_untouched() {
    let dir = TempDir::new().unwrap();
    let form = form_with_image(&dir);
    let service = DiagnosisService::new(CannedPredictor::failing());
    let store = Rc::new(MemoryStore::new());
    let mut history = HistoryManager::new(Rc::clone(&store));
    let mut view = BufferedView::default();

    let err = service.submit(&form, &mut history, &mut view).await.unwrap_err();

    assert!(matches!(
        err,
        SubmitError::Prediction(PredictionError::Server { status: 500, .. })
    ));
    assert_eq!(err.user_message(), "Something went wrong. Please try again.");
    assert_eq!(service.predictor().calls.get(), 1);
    assert!(history.load_log().is_empty());
    assert_eq!(view.writes, 0);
}

#[tokio::test]
async fn test_successful_submit_records_and_refreshes() {
    let dir = TempDir::new().unwrap();
    let form = form_with_image(&dir);
    let service = DiagnosisService::new(CannedPredictor::ok());
    let store = Rc::new(MemoryStore::new());
    let mut history = HistoryManager::new(Rc::clone(&store));
    let mut view = BufferedView::default();

    let outcome = service.submit(&form, &mut history, &mut view).await.unwrap();

    assert!(outcome.notices.is_empty());
    assert_eq!(outcome.result().disease, "ANTHRACNOSE");
    assert_eq!(outcome.result().confidence, Confidence::from("93.02%"));
    assert_eq!(Some(outcome.record.image.as_str()), form.preview());
    assert_eq!(outcome.record.date.len(), "2026-10-15 08:30:00".len());

    let log = history.load_log();
    assert_eq!(log.len(), 1);
    assert_eq!(log.first(), Some(&outcome.record));

    assert_eq!(view.writes, 1);
    assert!(view.markup.contains("ANTHRACNOSE"));
    assert!(view.markup.contains("Prune and apply copper fungicide"));
}

#[tokio::test]
async fn test_history_write_failure_becomes_notice() {
    let dir = TempDir::new().unwrap();
    let form = form_with_image(&dir);
    let service = DiagnosisService::new(CannedPredictor::ok());
    let store = MemoryStore::with_quota(32);
    let mut history = HistoryManager::new(&store);
    let mut view = BufferedView::default();

    let outcome = service.submit(&form, &mut history, &mut view).await.unwrap();

    assert_eq!(outcome.result().disease, "ANTHRACNOSE");
    assert_eq!(outcome.notices.len(), 1);
    assert!(outcome.notices[0]
        .message
        .starts_with("Result could not be saved to history:"));
    assert!(history.load_log().is_empty());
    assert_eq!(view.writes, 1);
    assert_eq!(view.markup, EMPTY_HISTORY_HTML);
}
