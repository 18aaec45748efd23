//! Remote actor port
//!
//! Defines the interface for talking to the backend the session mirrors.

use async_trait::async_trait;
use sentiment_domain::{AnalysisOutcome, Identity};
use thiserror::Error;

/// Errors that can occur during remote actor calls
///
/// `Rejected` means the call reached the remote and the remote answered
/// with a business-level failure. `Transport` means the call itself could
/// not complete. Both end up as a failed operation status, but they are
/// logged at different levels.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("remote rejected the request: {0}")]
    Rejected(String),

    #[error("transport failure: {0}")]
    Transport(String),
}

impl ClientError {
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }
}

/// Typed surface of the remote actor
///
/// This port defines how the application layer reaches the backend.
/// Implementations (adapters) live in the infrastructure layer. One handle
/// represents one authenticated user; calls carry no caller identity.
///
/// Calls are independent of each other. Any sequencing between them is the
/// orchestrator's concern, not the adapter's.
#[async_trait]
pub trait RemoteActorClient: Send + Sync {
    /// Fetch the stored profile of the authenticated user
    async fn get_profile(&self) -> Result<Identity, ClientError>;

    /// Create or rename the profile, returning the identity the remote stored
    async fn set_profile(&self, name: &str) -> Result<Identity, ClientError>;

    /// Fetch the user's stored analysis results as opaque encoded records
    async fn get_results(&self) -> Result<Vec<String>, ClientError>;

    /// Run one sentiment inference over `text`
    ///
    /// A successful outcome carries a confidence in `[0, 1]`; adapters
    /// reject payloads outside that range.
    async fn analyze_sentiment(&self, text: &str) -> Result<AnalysisOutcome, ClientError>;
}
