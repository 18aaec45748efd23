//! Background session task
//!
//! Owns the [`SessionOrchestrator`] and is the only code that touches it
//! after startup. Commands arrive over a channel; every remote call the
//! orchestrator asks for runs as its own spawned task, so calls overlap
//! while state transitions stay strictly sequential.

use crate::ports::remote_actor::RemoteActorClient;
use crate::session::orchestrator::{
    CallOutcome, RemoteCall, SessionCommand, SessionOrchestrator,
};
use crate::session::snapshot::SessionSnapshot;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Caller-side handle to a running session
///
/// Cheap to clone; all clones feed the same session. Sends are fire and
/// forget: outcomes arrive through the snapshot stream.
#[derive(Clone)]
pub struct SessionHandle {
    cmd_tx: mpsc::UnboundedSender<SessionCommand>,
}

impl SessionHandle {
    /// Inject the authenticated backend handle; starts a fresh session
    pub fn actor_ready(&self, client: Arc<dyn RemoteActorClient>) {
        let _ = self.cmd_tx.send(SessionCommand::ActorReady(client));
    }

    /// Create or rename the user profile
    pub fn submit_profile(&self, name: impl Into<String>) {
        let _ = self.cmd_tx.send(SessionCommand::SubmitProfile(name.into()));
    }

    /// Run one sentiment inference
    pub fn analyze(&self, text: impl Into<String>) {
        let _ = self.cmd_tx.send(SessionCommand::Analyze(text.into()));
    }

    /// Stop the session task
    pub fn shutdown(&self) {
        let _ = self.cmd_tx.send(SessionCommand::Shutdown);
    }
}

/// Spawn the session runtime
///
/// Returns the command handle, the snapshot stream, and the join handle of
/// the background task. The task ends on [`SessionHandle::shutdown`] or when
/// every handle is dropped; remote calls still in flight are dropped with it.
pub fn spawn_session() -> (
    SessionHandle,
    mpsc::UnboundedReceiver<SessionSnapshot>,
    JoinHandle<()>,
) {
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (snapshot_tx, snapshot_rx) = mpsc::unbounded_channel();
    let orchestrator = SessionOrchestrator::new(snapshot_tx);
    let task = tokio::spawn(session_task(orchestrator, cmd_rx));
    (SessionHandle { cmd_tx }, snapshot_rx, task)
}

async fn session_task(
    mut orchestrator: SessionOrchestrator,
    mut cmd_rx: mpsc::UnboundedReceiver<SessionCommand>,
) {
    let mut calls = tokio::task::JoinSet::new();

    loop {
        tokio::select! {
            biased;

            // Apply completed remote calls first
            Some(res) = calls.join_next() => {
                match res {
                    Ok(outcome) => {
                        if let Some(follow_up) = orchestrator.finalize(outcome) {
                            spawn_call(&mut calls, &orchestrator, follow_up);
                        }
                    }
                    Err(e) => {
                        if e.is_cancelled() {
                            // ignore
                        } else {
                            // A panicked call behaves like one that never
                            // came back: its status stays in flight
                            error!("Remote call task panicked: {}", e);
                        }
                    }
                }
            }

            // Handle commands
            cmd_opt = cmd_rx.recv() => {
                let cmd = match cmd_opt {
                    Some(c) => c,
                    None => break, // Channel closed
                };

                if matches!(cmd, SessionCommand::Shutdown) {
                    debug!("Session shutting down");
                    break;
                }

                if matches!(cmd, SessionCommand::ActorReady(_)) {
                    // A new session must not see completions from the old
                    // one; the drain also discards calls that already
                    // finished but were not yet applied
                    calls.abort_all();
                    while calls.join_next().await.is_some() {}
                }

                if let Some(call) = orchestrator.handle_command(cmd) {
                    spawn_call(&mut calls, &orchestrator, call);
                }
            }
        }
    }
}

/// Spawn one remote call as its own task
fn spawn_call(
    calls: &mut tokio::task::JoinSet<CallOutcome>,
    orchestrator: &SessionOrchestrator,
    call: RemoteCall,
) {
    let Some(client) = orchestrator.client() else {
        // handle_command only emits calls once a client is injected
        error!("No remote actor available for {:?}", call);
        return;
    };

    calls.spawn(async move {
        match call {
            RemoteCall::LoadProfile => CallOutcome::ProfileLoaded(client.get_profile().await),
            RemoteCall::SaveProfile(name) => {
                CallOutcome::ProfileSaved(client.set_profile(&name).await)
            }
            RemoteCall::LoadHistory => CallOutcome::HistoryLoaded(client.get_results().await),
            RemoteCall::Analyze(text) => {
                let outcome = client.analyze_sentiment(&text).await;
                CallOutcome::AnalysisFinished { text, outcome }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::remote_actor::ClientError;
    use async_trait::async_trait;
    use sentiment_domain::{AnalysisOutcome, AnalysisRecord, Identity};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::oneshot;

    // ==================== Test Mocks ====================

    /// Scripted backend: each call pops its next response. `get_profile`
    /// and `get_results` can be gated on a oneshot so tests control when
    /// a call completes.
    struct MockActor {
        profiles: Mutex<VecDeque<Result<Identity, ClientError>>>,
        results: Mutex<VecDeque<Result<Vec<String>, ClientError>>>,
        analyses: Mutex<VecDeque<Result<AnalysisOutcome, ClientError>>>,
        profiles_gate: Mutex<Option<oneshot::Receiver<()>>>,
        results_gate: Mutex<Option<oneshot::Receiver<()>>>,
        results_calls: AtomicUsize,
    }

    impl MockActor {
        fn new() -> Self {
            Self {
                profiles: Mutex::new(VecDeque::new()),
                results: Mutex::new(VecDeque::new()),
                analyses: Mutex::new(VecDeque::new()),
                profiles_gate: Mutex::new(None),
                results_gate: Mutex::new(None),
                results_calls: AtomicUsize::new(0),
            }
        }

        fn with_profile(self, response: Result<Identity, ClientError>) -> Self {
            self.profiles.lock().unwrap().push_back(response);
            self
        }

        fn with_results(self, response: Result<Vec<String>, ClientError>) -> Self {
            self.results.lock().unwrap().push_back(response);
            self
        }

        fn with_analysis(self, response: Result<AnalysisOutcome, ClientError>) -> Self {
            self.analyses.lock().unwrap().push_back(response);
            self
        }

        /// Hold the next `get_profile` call until the returned sender fires
        fn gated_profiles(self) -> (Self, oneshot::Sender<()>) {
            let (tx, rx) = oneshot::channel();
            *self.profiles_gate.lock().unwrap() = Some(rx);
            (self, tx)
        }

        /// Hold the next `get_results` call until the returned sender fires
        fn gated_results(self) -> (Self, oneshot::Sender<()>) {
            let (tx, rx) = oneshot::channel();
            *self.results_gate.lock().unwrap() = Some(rx);
            (self, tx)
        }

        fn results_call_count(&self) -> usize {
            self.results_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RemoteActorClient for MockActor {
        async fn get_profile(&self) -> Result<Identity, ClientError> {
            let gate = self.profiles_gate.lock().unwrap().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            self.profiles
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ClientError::Rejected("no scripted profile".to_string())))
        }

        async fn set_profile(&self, name: &str) -> Result<Identity, ClientError> {
            self.profiles
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Identity::new("u1", name)))
        }

        async fn get_results(&self) -> Result<Vec<String>, ClientError> {
            self.results_calls.fetch_add(1, Ordering::SeqCst);
            let gate = self.results_gate.lock().unwrap().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            self.results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(vec![]))
        }

        async fn analyze_sentiment(&self, _text: &str) -> Result<AnalysisOutcome, ClientError> {
            self.analyses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| {
                    Err(ClientError::Rejected("no scripted analysis".to_string()))
                })
        }
    }

    /// Wait for the first snapshot matching the predicate
    async fn wait_for(
        rx: &mut mpsc::UnboundedReceiver<SessionSnapshot>,
        predicate: impl Fn(&SessionSnapshot) -> bool,
    ) -> SessionSnapshot {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let snapshot = rx.recv().await.expect("snapshot stream closed");
                if predicate(&snapshot) {
                    return snapshot;
                }
            }
        })
        .await
        .expect("no matching snapshot arrived")
    }

    fn encoded(text: &str, sentiment: &str, confidence: f64) -> String {
        AnalysisRecord::new(text, sentiment, confidence).encode()
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_login_loads_profile_then_history() {
        let actor = MockActor::new()
            .with_profile(Ok(Identity::new("u1", "Ann")))
            .with_results(Ok(vec![encoded("ok", "positive", 0.9)]));

        let (session, mut snapshots, task) = spawn_session();
        session.actor_ready(Arc::new(actor));

        let snapshot = wait_for(&mut snapshots, |s| s.history_status.is_succeeded()).await;
        assert_eq!(snapshot.identity.unwrap().name(), "Ann");
        assert_eq!(snapshot.history.len(), 1);
        assert_eq!(snapshot.history[0].text, "ok");

        session.shutdown();
        task.await.unwrap();
    }

    #[tokio::test]
    async fn test_profile_failure_never_touches_history() {
        let actor = Arc::new(
            MockActor::new()
                .with_profile(Err(ClientError::Transport("connection refused".to_string()))),
        );

        let (session, mut snapshots, task) = spawn_session();
        session.actor_ready(actor.clone());

        let snapshot = wait_for(&mut snapshots, |s| s.profile_status.is_failed()).await;
        assert!(snapshot.history_status.is_idle());
        assert_eq!(actor.results_call_count(), 0);

        session.shutdown();
        task.await.unwrap();
    }

    #[tokio::test]
    async fn test_history_loaded_exactly_once_per_login() {
        let actor = Arc::new(
            MockActor::new()
                .with_profile(Ok(Identity::new("u1", "Ann")))
                .with_results(Ok(vec![])),
        );

        let (session, mut snapshots, task) = spawn_session();
        session.actor_ready(actor.clone());

        wait_for(&mut snapshots, |s| s.history_status.is_succeeded()).await;
        assert_eq!(actor.results_call_count(), 1);

        session.shutdown();
        task.await.unwrap();
    }

    #[tokio::test]
    async fn test_analysis_during_history_load_is_replaced() {
        let (actor, gate) = MockActor::new()
            .with_profile(Ok(Identity::new("u1", "Ann")))
            .with_results(Ok(vec![encoded("stored", "neutral", 0.5)]))
            .with_analysis(Ok(AnalysisOutcome::new("positive", 0.95)))
            .gated_results();

        let (session, mut snapshots, task) = spawn_session();
        session.actor_ready(Arc::new(actor));

        // Profile resolved, history load held open by the gate
        wait_for(&mut snapshots, |s| {
            s.profile_status.is_succeeded() && s.history_status.is_in_flight()
        })
        .await;

        // Analysis completes first and lands locally
        session.analyze("fresh");
        let snapshot = wait_for(&mut snapshots, |s| s.analyze_status.is_succeeded()).await;
        assert_eq!(snapshot.history.len(), 1);
        assert_eq!(snapshot.history[0].text, "fresh");

        // Now the load lands and wins wholesale
        gate.send(()).unwrap();
        let snapshot = wait_for(&mut snapshots, |s| s.history_status.is_succeeded()).await;
        assert_eq!(snapshot.history.len(), 1);
        assert_eq!(snapshot.history[0].text, "stored");

        session.shutdown();
        task.await.unwrap();
    }

    #[tokio::test]
    async fn test_actor_ready_discards_outstanding_calls() {
        let (first, gate) = MockActor::new()
            .with_profile(Ok(Identity::new("u1", "Ann")))
            .gated_profiles();
        let second = MockActor::new()
            .with_profile(Ok(Identity::new("u2", "Bea")))
            .with_results(Ok(vec![]))
            .with_analysis(Ok(AnalysisOutcome::new("positive", 0.9)));

        let (session, mut snapshots, task) = spawn_session();
        session.actor_ready(Arc::new(first));
        wait_for(&mut snapshots, |s| s.profile_status.is_in_flight()).await;

        // The second handle arrives while the first profile load is still
        // parked behind the gate
        session.actor_ready(Arc::new(second));
        let snapshot = wait_for(&mut snapshots, |s| s.history_status.is_succeeded()).await;
        assert_eq!(snapshot.identity.as_ref().unwrap().name(), "Bea");

        // Releasing the old call must change nothing in the new session
        let _ = gate.send(());
        session.analyze("fine");
        let snapshot = wait_for(&mut snapshots, |s| s.analyze_status.is_succeeded()).await;
        assert_eq!(snapshot.identity.as_ref().unwrap().name(), "Bea");
        assert!(snapshot.profile_status.is_succeeded());

        session.shutdown();
        task.await.unwrap();
    }

    #[tokio::test]
    async fn test_rename_updates_identity() {
        let actor = MockActor::new()
            .with_profile(Ok(Identity::new("u1", "Ann")))
            .with_profile(Ok(Identity::new("u1", "Bea")))
            .with_results(Ok(vec![]))
            .with_results(Ok(vec![]));

        let (session, mut snapshots, task) = spawn_session();
        session.actor_ready(Arc::new(actor));
        wait_for(&mut snapshots, |s| s.history_status.is_succeeded()).await;

        session.submit_profile("Bea");
        let snapshot = wait_for(&mut snapshots, |s| {
            s.identity.as_ref().is_some_and(|i| i.name() == "Bea")
        })
        .await;
        assert!(snapshot.profile_status.is_succeeded());

        session.shutdown();
        task.await.unwrap();
    }

    #[tokio::test]
    async fn test_shutdown_ends_task() {
        let (session, _snapshots, task) = spawn_session();
        session.shutdown();
        task.await.unwrap();
    }
}
