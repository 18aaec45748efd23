//! Render-ready session snapshot

use sentiment_domain::{AnalysisOutcome, AnalysisRecord, Identity, OperationStatus};

/// A read-only view of the whole session
///
/// Re-derived from the live state after every mutation and published to
/// whoever is rendering. This is the complete observable surface; consumers
/// never reach into the live state itself.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    /// Remote-confirmed identity, if the profile operation has succeeded
    pub identity: Option<Identity>,
    /// Status of the profile load/create/rename operation
    pub profile_status: OperationStatus,
    /// Status of the history load
    pub history_status: OperationStatus,
    /// Status of the current analysis
    pub analyze_status: OperationStatus,
    /// Outcome of the most recent analysis, if it succeeded
    pub current_analysis: Option<AnalysisOutcome>,
    /// All known analysis records, oldest first
    pub history: Vec<AnalysisRecord>,
}
