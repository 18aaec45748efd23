//! Single-analysis controller

use sentiment_domain::{AnalysisOutcome, OperationStatus};

/// State of the current analysis request and its latest outcome
///
/// Tracks the most recent analysis only. Starting a new one clears the
/// previous outcome, so a stale result can never be shown next to an
/// in-flight request. The orchestrator guarantees at most one analysis is
/// in flight at a time.
#[derive(Debug, Default)]
pub struct AnalysisController {
    outcome: Option<AnalysisOutcome>,
    status: OperationStatus,
}

impl AnalysisController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outcome(&self) -> Option<&AnalysisOutcome> {
        self.outcome.as_ref()
    }

    pub fn status(&self) -> &OperationStatus {
        &self.status
    }

    pub fn is_busy(&self) -> bool {
        self.status.is_in_flight()
    }

    /// Start a new analysis: the prior outcome no longer applies
    pub fn begin(&mut self) {
        self.outcome = None;
        self.status = OperationStatus::InFlight;
    }

    /// Apply a completed inference
    pub fn succeed(&mut self, outcome: AnalysisOutcome) {
        self.outcome = Some(outcome);
        self.status = OperationStatus::Succeeded;
    }

    /// Apply a failed inference: there is no current outcome
    pub fn fail(&mut self, reason: impl Into<String>) {
        self.outcome = None;
        self.status = OperationStatus::Failed(reason.into());
    }

    /// Forget everything (a new session is starting)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
