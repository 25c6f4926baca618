use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum number of records kept in the history log.
pub const HISTORY_CAPACITY: usize = 10;

/// Confidence value exactly as the prediction service returned it.
///
/// The service normally sends a preformatted string such as `"97.12%"`,
/// but a bare number is accepted and stored unchanged. Numbers keep their
/// JSON form, so an integer `97` stays `97`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Confidence {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::Text(s) => f.write_str(s),
            Confidence::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for Confidence {
    fn from(s: &str) -> Self {
        Confidence::Text(s.to_string())
    }
}

/// Outcome of one prediction, as stored in history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosisResult {
    pub disease: String,
    pub confidence: Confidence,
    /// May contain markup (links to further reading).
    pub recommendation: String,
}

/// One stored prediction outcome plus the image and timestamp that produced it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosisRecord {
    pub date: String,
    /// Data URI of the previewed image.
    pub image: String,
    pub result: DiagnosisResult,
}

/// Capacity-bounded, newest-first collection of diagnosis records.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct HistoryLog {
    records: Vec<DiagnosisRecord>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a log from stored records, keeping only the first
    /// `HISTORY_CAPACITY` entries.
    pub fn from_records(mut records: Vec<DiagnosisRecord>) -> Self {
        records.truncate(HISTORY_CAPACITY);
        Self { records }
    }

    /// Inserts `record` at the head. Returns the evicted tail record when
    /// the log was already full.
    pub fn push_front(&mut self, record: DiagnosisRecord) -> Option<DiagnosisRecord> {
        self.records.insert(0, record);
        if self.records.len() > HISTORY_CAPACITY {
            self.records.pop()
        } else {
            None
        }
    }

    pub fn records(&self) -> &[DiagnosisRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first(&self) -> Option<&DiagnosisRecord> {
        self.records.first()
    }
}
