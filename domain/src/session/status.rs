//! Per-operation status tracking

/// Status of one asynchronous remote operation kind (Value Object)
///
/// Each operation kind the session performs (profile, history load,
/// analysis) carries exactly one of these at a time. `Failed` holds the
/// reason exactly as it should be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OperationStatus {
    /// Never attempted in this session
    #[default]
    Idle,
    /// Started but not yet resolved
    InFlight,
    /// Last attempt completed successfully
    Succeeded,
    /// Last attempt failed with the given reason
    Failed(String),
}

impl OperationStatus {
    pub fn is_idle(&self) -> bool {
        matches!(self, OperationStatus::Idle)
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, OperationStatus::InFlight)
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, OperationStatus::Succeeded)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, OperationStatus::Failed(_))
    }

    /// The failure reason, if the last attempt failed
    pub fn failure(&self) -> Option<&str> {
        match self {
            OperationStatus::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

impl std::fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationStatus::Idle => write!(f, "idle"),
            OperationStatus::InFlight => write!(f, "in flight"),
            OperationStatus::Succeeded => write!(f, "succeeded"),
            OperationStatus::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}
