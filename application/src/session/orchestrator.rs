//! Session orchestrator
//!
//! The single writer of all session state. User commands and call
//! completions both enter here; every entry point applies its state
//! transition atomically and then publishes a fresh [`SessionSnapshot`].
//!
//! The orchestrator decides WHICH remote calls should happen and in what
//! order, but never performs them itself: it hands a [`RemoteCall`] back to
//! the runtime, which spawns the call and feeds the [`CallOutcome`] back in.
//! That split keeps every transition synchronous and testable while the
//! calls themselves overlap freely.

use crate::ports::remote_actor::{ClientError, RemoteActorClient};
use crate::session::analysis_controller::AnalysisController;
use crate::session::history_store::HistoryStore;
use crate::session::snapshot::SessionSnapshot;
use crate::session::state::SessionState;
use sentiment_domain::util::preview;
use sentiment_domain::{AnalysisOutcome, AnalysisRecord, Identity};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Commands accepted by a running session
pub enum SessionCommand {
    /// A freshly authenticated backend handle; starts a new session
    ActorReady(Arc<dyn RemoteActorClient>),
    /// Create or rename the user profile
    SubmitProfile(String),
    /// Run one sentiment inference
    Analyze(String),
    /// Stop the session runtime
    Shutdown,
}

/// A remote call the runtime should spawn on the orchestrator's behalf
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCall {
    LoadProfile,
    SaveProfile(String),
    LoadHistory,
    Analyze(String),
}

/// The completion of a previously requested remote call
#[derive(Debug)]
pub enum CallOutcome {
    ProfileLoaded(Result<Identity, ClientError>),
    ProfileSaved(Result<Identity, ClientError>),
    HistoryLoaded(Result<Vec<String>, ClientError>),
    AnalysisFinished {
        text: String,
        outcome: Result<AnalysisOutcome, ClientError>,
    },
}

/// Owner and single writer of the session state
pub struct SessionOrchestrator {
    client: Option<Arc<dyn RemoteActorClient>>,
    profile: SessionState,
    history: HistoryStore,
    analysis: AnalysisController,
    snapshot_tx: mpsc::UnboundedSender<SessionSnapshot>,
}

impl SessionOrchestrator {
    pub fn new(snapshot_tx: mpsc::UnboundedSender<SessionSnapshot>) -> Self {
        Self {
            client: None,
            profile: SessionState::new(),
            history: HistoryStore::new(),
            analysis: AnalysisController::new(),
            snapshot_tx,
        }
    }

    /// The injected backend handle, if one has arrived yet
    pub fn client(&self) -> Option<Arc<dyn RemoteActorClient>> {
        self.client.clone()
    }

    /// Derive the current observable view
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            identity: self.profile.identity().cloned(),
            profile_status: self.profile.status().clone(),
            history_status: self.history.status().clone(),
            analyze_status: self.analysis.status().clone(),
            current_analysis: self.analysis.outcome().cloned(),
            history: self.history.records().to_vec(),
        }
    }

    fn publish(&self) {
        // The receiver dropping just means nobody is rendering anymore
        let _ = self.snapshot_tx.send(self.snapshot());
    }

    // -- Command handling --

    /// Apply one inbound command, returning the remote call to spawn (if any)
    ///
    /// Commands that should not run right now (blank input, no backend yet,
    /// the same operation kind already in flight) are dropped here with a
    /// log line and cause no state change.
    pub fn handle_command(&mut self, command: SessionCommand) -> Option<RemoteCall> {
        match command {
            SessionCommand::ActorReady(client) => {
                info!("Remote actor ready, starting session");
                self.client = Some(client);
                self.profile.reset();
                self.history.reset();
                self.analysis.reset();
                self.profile.begin();
                self.publish();
                Some(RemoteCall::LoadProfile)
            }
            SessionCommand::SubmitProfile(name) => {
                let name = name.trim();
                if name.is_empty() {
                    debug!("Ignoring empty profile name");
                    return None;
                }
                if self.client.is_none() {
                    warn!("No remote actor yet, dropping profile submit");
                    return None;
                }
                if self.profile.status().is_in_flight() {
                    warn!("Profile operation already in flight, dropping submit");
                    return None;
                }
                debug!("Submitting profile name \"{}\"", name);
                self.profile.begin();
                self.publish();
                Some(RemoteCall::SaveProfile(name.to_string()))
            }
            SessionCommand::Analyze(text) => {
                let text = text.trim();
                if text.is_empty() {
                    debug!("Ignoring empty analysis input");
                    return None;
                }
                if self.client.is_none() {
                    warn!("No remote actor yet, dropping analysis request");
                    return None;
                }
                if self.analysis.is_busy() {
                    warn!(
                        "Analysis already in flight, dropping \"{}\"",
                        preview(text, 40)
                    );
                    return None;
                }
                debug!("Starting analysis of \"{}\"", preview(text, 80));
                self.analysis.begin();
                self.publish();
                Some(RemoteCall::Analyze(text.to_string()))
            }
            // Shutdown is consumed by the runtime loop before it gets here
            SessionCommand::Shutdown => None,
        }
    }

    // -- Completion handling --

    /// Apply the result of a completed remote call, returning a follow-up
    /// call when one is causally required
    pub fn finalize(&mut self, outcome: CallOutcome) -> Option<RemoteCall> {
        let follow_up = match outcome {
            CallOutcome::ProfileLoaded(result) => match result {
                Ok(identity) => {
                    info!("Profile loaded: {}", identity);
                    self.profile.succeed(identity);
                    self.begin_history_load()
                }
                Err(e) => {
                    self.log_call_error("profile load", &e);
                    self.profile.fail_load(e.to_string());
                    None
                }
            },
            CallOutcome::ProfileSaved(result) => match result {
                Ok(identity) => {
                    info!("Profile saved: {}", identity);
                    self.profile.succeed(identity);
                    self.begin_history_load()
                }
                Err(e) => {
                    self.log_call_error("profile save", &e);
                    // A failed rename must not erase a confirmed identity
                    self.profile.fail_update(e.to_string());
                    None
                }
            },
            CallOutcome::HistoryLoaded(result) => match result {
                Ok(encoded) => {
                    self.history.replace_from_remote(encoded);
                    None
                }
                Err(e) => {
                    self.log_call_error("history load", &e);
                    self.history.fail_load(e.to_string());
                    None
                }
            },
            CallOutcome::AnalysisFinished { text, outcome } => match outcome {
                Ok(outcome) => match AnalysisRecord::from_outcome(text, &outcome) {
                    Ok(record) => {
                        info!(
                            "Analysis finished: {} ({:.2})",
                            outcome.result, outcome.confidence
                        );
                        self.history.append(record);
                        self.analysis.succeed(outcome);
                        None
                    }
                    Err(e) => {
                        // An outcome the history could never hold is a failure
                        warn!("Analysis outcome refused: {}", e);
                        self.analysis.fail(e.to_string());
                        None
                    }
                },
                Err(e) => {
                    self.log_call_error("analysis", &e);
                    self.analysis.fail(e.to_string());
                    None
                }
            },
        };
        self.publish();
        follow_up
    }

    /// Start the history load that follows a successful profile operation
    fn begin_history_load(&mut self) -> Option<RemoteCall> {
        if self.history.status().is_in_flight() {
            // The running load is about to be authoritative anyway
            debug!("History load already in flight, not starting another");
            return None;
        }
        self.history.begin_load();
        Some(RemoteCall::LoadHistory)
    }

    fn log_call_error(&self, operation: &str, e: &ClientError) {
        if e.is_transport() {
            error!("{} failed: {}", operation, e);
        } else {
            warn!("{} rejected by remote: {}", operation, e);
        }
    }
}
