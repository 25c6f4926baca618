//! History Manager for cocoadiag.
//!
//! Implements `HistoryManagerTrait`: the capacity-bounded, newest-first
//! log of diagnosis records persisted as one JSON array under
//! [`HISTORY_KEY`] in a [`KeyValueStore`].

use crate::storage::KeyValueStore;
use crate::types::diagnosis::{DiagnosisRecord, HistoryLog};
use crate::types::errors::HistoryError;

/// Storage key holding the serialized history log.
pub const HISTORY_KEY: &str = "diagnosisHistory";

/// One display block computed from a stored record.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryBlock {
    pub date: String,
    pub image: String,
    pub disease: String,
    pub confidence: String,
    pub recommendation: String,
}

impl From<&DiagnosisRecord> for HistoryBlock {
    fn from(record: &DiagnosisRecord) -> Self {
        Self {
            date: record.date.clone(),
            image: record.image.clone(),
            disease: record.result.disease.clone(),
            confidence: record.result.confidence.to_string(),
            recommendation: record.result.recommendation.clone(),
        }
    }
}

/// Display representation of the history log.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedHistory {
    /// No records: show the "no history" placeholder.
    Empty,
    /// One block per record, newest first.
    Entries(Vec<HistoryBlock>),
}

/// Computes the display blocks for `log`. Pure.
pub fn render_log(log: &HistoryLog) -> RenderedHistory {
    if log.is_empty() {
        return RenderedHistory::Empty;
    }
    RenderedHistory::Entries(log.records().iter().map(HistoryBlock::from).collect())
}

/// Trait defining history store operations.
pub trait HistoryManagerTrait {
    fn append(&mut self, record: DiagnosisRecord) -> Result<(), HistoryError>;
    fn load_log(&self) -> HistoryLog;
    fn render(&self) -> RenderedHistory;
}

/// History store backed by an injected key/value storage.
pub struct HistoryManager<S: KeyValueStore> {
    storage: S,
}

impl<S: KeyValueStore> HistoryManager<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }
}

impl<S: KeyValueStore> HistoryManagerTrait for HistoryManager<S> {
    /// Inserts `record` at the head of the persisted log, dropping the
    /// oldest entry past capacity, and writes the log back.
    ///
    /// The only failure is the final write; a broken stored value is
    /// treated as an empty log and overwritten.
    fn append(&mut self, record: DiagnosisRecord) -> Result<(), HistoryError> {
        let mut log = self.load_log();
        if let Some(evicted) = log.push_front(record) {
            tracing::debug!(date = %evicted.date, "Evicted oldest history record");
        }

        let json = serde_json::to_string(&log)
            .map_err(|e| HistoryError::SerializationError(e.to_string()))?;
        self.storage
            .set_item(HISTORY_KEY, &json)
            .map_err(HistoryError::WriteFailed)?;

        tracing::debug!(entries = log.len(), bytes = json.len(), "History saved");
        Ok(())
    }

    /// Loads the persisted log.
    ///
    /// Never fails: an absent key, a stored `null`, unparseable JSON, a
    /// value of the wrong shape, or a storage read error all yield an
    /// empty log. Anything other than "absent" is logged at warn level.
    fn load_log(&self) -> HistoryLog {
        let raw = match self.storage.get_item(HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return HistoryLog::new(),
            Err(e) => {
                tracing::warn!(error = %e, "History read failed; treating as empty");
                return HistoryLog::new();
            }
        };

        match serde_json::from_str::<Option<Vec<DiagnosisRecord>>>(&raw) {
            Ok(Some(records)) => HistoryLog::from_records(records),
            Ok(None) => HistoryLog::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Stored history is corrupt; treating as empty");
                HistoryLog::new()
            }
        }
    }

    fn render(&self) -> RenderedHistory {
        render_log(&self.load_log())
    }
}
