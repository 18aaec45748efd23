//! Session identity state

use sentiment_domain::{Identity, OperationStatus};

/// The identity slice of the session: who the user is, if known yet
///
/// `identity` only ever holds remote-confirmed data. Local input (a typed
/// name) never lands here directly; it goes to the remote and comes back as
/// part of a confirmed [`Identity`].
#[derive(Debug, Default)]
pub struct SessionState {
    identity: Option<Identity>,
    status: OperationStatus,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn status(&self) -> &OperationStatus {
        &self.status
    }

    /// Mark a profile operation as started
    pub fn begin(&mut self) {
        self.status = OperationStatus::InFlight;
    }

    /// Apply a successful profile response
    pub fn succeed(&mut self, identity: Identity) {
        self.identity = Some(identity);
        self.status = OperationStatus::Succeeded;
    }

    /// Apply a failed profile load: the identity is unknown
    pub fn fail_load(&mut self, reason: impl Into<String>) {
        self.identity = None;
        self.status = OperationStatus::Failed(reason.into());
    }

    /// Apply a failed create/rename: a previously confirmed identity survives
    pub fn fail_update(&mut self, reason: impl Into<String>) {
        self.status = OperationStatus::Failed(reason.into());
    }

    /// Forget everything (a new session is starting)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
