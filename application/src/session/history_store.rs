//! Analysis history store

use sentiment_domain::{AnalysisRecord, OperationStatus};
use tracing::{debug, warn};

/// Ordered collection of past analyses, plus its load status
///
/// Records only enter through two paths: a wholesale replacement when a
/// remote fetch succeeds, and an append when a fresh analysis completes.
/// No record is ever mutated after insertion, and local ordering is
/// arrival order.
#[derive(Debug, Default)]
pub struct HistoryStore {
    records: Vec<AnalysisRecord>,
    status: OperationStatus,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[AnalysisRecord] {
        &self.records
    }

    pub fn status(&self) -> &OperationStatus {
        &self.status
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Mark a remote load as started
    pub fn begin_load(&mut self) {
        self.status = OperationStatus::InFlight;
    }

    /// Replace the whole collection with a freshly fetched batch
    ///
    /// Each encoded record is decoded independently: an undecodable entry is
    /// dropped with a warning and does not hide the rest of the batch. The
    /// remote result is authoritative; whatever was held locally is gone.
    pub fn replace_from_remote(&mut self, encoded: Vec<String>) {
        let total = encoded.len();
        let mut records = Vec::with_capacity(total);
        for entry in &encoded {
            match AnalysisRecord::decode(entry) {
                Ok(record) => records.push(record),
                Err(e) => warn!("Dropping undecodable history record: {}", e),
            }
        }
        debug!("History loaded: {} of {} stored records", records.len(), total);
        self.records = records;
        self.status = OperationStatus::Succeeded;
    }

    /// Record a failed load, keeping whatever was last known
    pub fn fail_load(&mut self, reason: impl Into<String>) {
        self.status = OperationStatus::Failed(reason.into());
    }

    /// Append one freshly produced record
    pub fn append(&mut self, record: AnalysisRecord) {
        self.records.push(record);
    }

    /// Forget everything (a new session is starting)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
