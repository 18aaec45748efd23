//! Analysis outcome value object

use serde::{Deserialize, Serialize};

/// The result of one sentiment inference (Value Object)
///
/// `result` is the label exactly as the model produced it; the client does
/// not normalize or interpret it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    /// Sentiment label (e.g. "positive", "negative")
    pub result: String,
    /// Model confidence in `[0.0, 1.0]`
    pub confidence: f64,
}

impl AnalysisOutcome {
    pub fn new(result: impl Into<String>, confidence: f64) -> Self {
        Self {
            result: result.into(),
            confidence,
        }
    }
}
