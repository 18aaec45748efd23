//! Offline remote actor
//!
//! In-process stand-in for the backend, for development and demos without a
//! network. The profile lives in memory, stored results accumulate as
//! analyses run, and sentiment comes from a small wordlist scorer. State
//! lasts exactly as long as the adapter does.

use async_trait::async_trait;
use sentiment_application::ports::remote_actor::{ClientError, RemoteActorClient};
use sentiment_domain::{AnalysisOutcome, AnalysisRecord, Identity};
use tokio::sync::Mutex;
use tracing::debug;

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "love", "happy", "excellent", "nice", "wonderful", "best", "fun", "amazing",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "hate", "sad", "awful", "worst", "angry", "horrible", "boring", "broken",
];

const OFFLINE_USER_ID: &str = "offline-user";

/// `RemoteActorClient` adapter that never leaves the process
pub struct OfflineRemoteActor {
    profile: Mutex<Option<Identity>>,
    results: Mutex<Vec<String>>,
}

impl OfflineRemoteActor {
    pub fn new() -> Self {
        Self {
            profile: Mutex::new(None),
            results: Mutex::new(Vec::new()),
        }
    }

    /// Start with pre-existing stored results
    pub fn with_results(results: Vec<String>) -> Self {
        Self {
            profile: Mutex::new(None),
            results: Mutex::new(results),
        }
    }

    /// Score a text by counting wordlist hits
    ///
    /// Confidence is the dominant list's share of all hits; no hits or a
    /// tie come back neutral at 0.5.
    fn score(text: &str) -> AnalysisOutcome {
        let mut positive = 0usize;
        let mut negative = 0usize;

        for word in text.to_lowercase().split(|c: char| !c.is_alphanumeric()) {
            if POSITIVE_WORDS.contains(&word) {
                positive += 1;
            } else if NEGATIVE_WORDS.contains(&word) {
                negative += 1;
            }
        }

        let total = positive + negative;
        if total == 0 || positive == negative {
            return AnalysisOutcome::new("neutral", 0.5);
        }
        if positive > negative {
            AnalysisOutcome::new("positive", positive as f64 / total as f64)
        } else {
            AnalysisOutcome::new("negative", negative as f64 / total as f64)
        }
    }
}

impl Default for OfflineRemoteActor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteActorClient for OfflineRemoteActor {
    async fn get_profile(&self) -> Result<Identity, ClientError> {
        match &*self.profile.lock().await {
            Some(identity) => Ok(identity.clone()),
            None => Err(ClientError::Rejected("no profile found".to_string())),
        }
    }

    async fn set_profile(&self, name: &str) -> Result<Identity, ClientError> {
        let identity = Identity::try_new(OFFLINE_USER_ID, name.trim())
            .ok_or_else(|| ClientError::Rejected("name cannot be empty".to_string()))?;
        *self.profile.lock().await = Some(identity.clone());
        debug!("Offline profile set to {}", identity);
        Ok(identity)
    }

    async fn get_results(&self) -> Result<Vec<String>, ClientError> {
        Ok(self.results.lock().await.clone())
    }

    async fn analyze_sentiment(&self, text: &str) -> Result<AnalysisOutcome, ClientError> {
        let outcome = Self::score(text);
        let record = AnalysisRecord::from_outcome(text, &outcome)
            .map_err(|e| ClientError::Rejected(e.to_string()))?;
        // Ingest immediately, like the real backend does for later loads
        self.results.lock().await.push(record.encode());
        debug!(
            "Offline analysis: {} ({:.2})",
            outcome.result, outcome.confidence
        );
        Ok(outcome)
    }
}
