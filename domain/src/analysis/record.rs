//! Stored analysis records

use crate::analysis::outcome::AnalysisOutcome;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a record could not be decoded or built
///
/// On the history-load path a bad record is dropped individually; it
/// never fails the batch it arrived in.
#[derive(Debug, Error)]
pub enum RecordDecodeError {
    #[error("malformed record: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("confidence {0} outside [0, 1]")]
    ConfidenceOutOfRange(f64),
}

/// One completed analysis as kept in the history (Entity)
///
/// Immutable once created: either decoded from a stored remote record or
/// built from a fresh outcome plus the text that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// The text that was analyzed
    pub text: String,
    /// Sentiment label the model assigned
    pub sentiment: String,
    /// Model confidence in `[0.0, 1.0]`
    pub confidence: f64,
}

impl AnalysisRecord {
    pub fn new(text: impl Into<String>, sentiment: impl Into<String>, confidence: f64) -> Self {
        Self {
            text: text.into(),
            sentiment: sentiment.into(),
            confidence,
        }
    }

    /// Build the record for a fresh analysis of `text`
    ///
    /// The confidence range is checked the same way `decode` checks it; an
    /// out-of-range outcome never becomes a record.
    pub fn from_outcome(
        text: impl Into<String>,
        outcome: &AnalysisOutcome,
    ) -> Result<Self, RecordDecodeError> {
        if !(0.0..=1.0).contains(&outcome.confidence) {
            return Err(RecordDecodeError::ConfidenceOutOfRange(outcome.confidence));
        }
        Ok(Self::new(text, outcome.result.clone(), outcome.confidence))
    }

    /// Decode one opaque stored record
    ///
    /// Records travel as JSON strings. Unknown fields are ignored; a missing
    /// field or an out-of-range confidence makes the record undecodable.
    pub fn decode(encoded: &str) -> Result<Self, RecordDecodeError> {
        let record: AnalysisRecord = serde_json::from_str(encoded)?;
        if !(0.0..=1.0).contains(&record.confidence) {
            return Err(RecordDecodeError::ConfidenceOutOfRange(record.confidence));
        }
        Ok(record)
    }

    /// Encode the record for storage
    pub fn encode(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_valid_record() {
        let record =
            AnalysisRecord::decode(r#"{"text":"ok","sentiment":"positive","confidence":0.9}"#)
                .unwrap();
        assert_eq!(record.text, "ok");
        assert_eq!(record.sentiment, "positive");
        assert_eq!(record.confidence, 0.9);
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let record = AnalysisRecord::decode(
            r#"{"text":"ok","sentiment":"positive","confidence":0.9,"model":"v2"}"#,
        )
        .unwrap();
        assert_eq!(record.sentiment, "positive");
    }

    #[test]
    fn test_decode_missing_field() {
        let result = AnalysisRecord::decode(r#"{"text":"ok","confidence":0.9}"#);
        assert!(matches!(result, Err(RecordDecodeError::Malformed(_))));
    }

    #[test]
    fn test_decode_not_json() {
        assert!(AnalysisRecord::decode("not json at all").is_err());
    }

    #[test]
    fn test_decode_confidence_out_of_range() {
        let result =
            AnalysisRecord::decode(r#"{"text":"ok","sentiment":"positive","confidence":1.5}"#);
        assert!(matches!(
            result,
            Err(RecordDecodeError::ConfidenceOutOfRange(_))
        ));
    }

    #[test]
    fn test_decode_confidence_bounds_inclusive() {
        assert!(
            AnalysisRecord::decode(r#"{"text":"a","sentiment":"neutral","confidence":0.0}"#)
                .is_ok()
        );
        assert!(
            AnalysisRecord::decode(r#"{"text":"a","sentiment":"positive","confidence":1.0}"#)
                .is_ok()
        );
    }

    #[test]
    fn test_from_outcome() {
        let outcome = AnalysisOutcome::new("negative", 0.75);
        let record = AnalysisRecord::from_outcome("bad day", &outcome).unwrap();
        assert_eq!(record.text, "bad day");
        assert_eq!(record.sentiment, "negative");
        assert_eq!(record.confidence, 0.75);
    }

    #[test]
    fn test_from_outcome_rejects_out_of_range_confidence() {
        let outcome = AnalysisOutcome::new("positive", 1.5);
        assert!(matches!(
            AnalysisRecord::from_outcome("odd", &outcome),
            Err(RecordDecodeError::ConfidenceOutOfRange(_))
        ));
    }

    #[test]
    fn test_encode_decode() {
        let record = AnalysisRecord::new("fine", "positive", 0.8);
        let decoded = AnalysisRecord::decode(&record.encode()).unwrap();
        assert_eq!(decoded, record);
    }
}
