//! Domain layer for sentiment-console
//!
//! This crate contains the core entities and value objects for the session
//! and analysis-history model. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Session
//!
//! A session is the client-side mirror of one user's state on the remote
//! actor: who the user is ([`Identity`]) and how each remote operation is
//! going ([`OperationStatus`]).
//!
//! ## Analysis
//!
//! One sentiment inference produces an [`AnalysisOutcome`]; the durable form
//! kept in the history is an [`AnalysisRecord`].

pub mod analysis;
pub mod session;
pub mod util;

// Re-export commonly used types
pub use analysis::{
    outcome::AnalysisOutcome,
    record::{AnalysisRecord, RecordDecodeError},
};
pub use session::{
    identity::{Identity, UserId},
    status::OperationStatus,
};
