//! Session state components and the runtime that drives them
//!
//! The three state components ([`state::SessionState`],
//! [`history_store::HistoryStore`], [`analysis_controller::AnalysisController`])
//! are plain synchronous types. The [`orchestrator::SessionOrchestrator`] is
//! their single writer; the [`runtime`] module owns the orchestrator inside a
//! background task and performs the actual remote calls.

pub mod analysis_controller;
pub mod history_store;
pub mod orchestrator;
pub mod runtime;
pub mod snapshot;
pub mod state;
