//! Application layer for sentiment-console
//!
//! This crate contains the session state components, the orchestrator that
//! drives them, and the port the remote actor adapters implement. It depends
//! only on the domain layer.

pub mod ports;
pub mod session;

// Re-export commonly used types
pub use ports::remote_actor::{ClientError, RemoteActorClient};
pub use session::{
    analysis_controller::AnalysisController,
    history_store::HistoryStore,
    orchestrator::{CallOutcome, RemoteCall, SessionCommand, SessionOrchestrator},
    runtime::{SessionHandle, spawn_session},
    snapshot::SessionSnapshot,
    state::SessionState,
};
