//! Identity value objects

/// An opaque user identifier assigned by the remote actor (Value Object)
///
/// The client never fabricates one of these; it only carries what the
/// remote actor handed back.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// Create a new user id
    ///
    /// # Panics
    /// Panics if the id is empty or only whitespace
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        assert!(!id.trim().is_empty(), "UserId cannot be empty");
        Self(id)
    }

    /// Try to create a user id, returning None if invalid
    pub fn try_new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.trim().is_empty() { None } else { Some(Self(id)) }
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user identity as confirmed by the remote actor (Entity)
///
/// Exists only after a profile operation succeeds; there is no
/// partially-known identity. Both fields come from the remote response,
/// never from local input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    id: UserId,
    name: String,
}

impl Identity {
    /// Create a new identity
    ///
    /// # Panics
    /// Panics if either field is empty or only whitespace
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::try_new(id, name).expect("Identity fields cannot be empty")
    }

    /// Try to create an identity, returning None if either field is blank
    pub fn try_new(id: impl Into<String>, name: impl Into<String>) -> Option<Self> {
        let id = UserId::try_new(id)?;
        let name = name.into();
        if name.trim().is_empty() {
            None
        } else {
            Some(Self { id, name })
        }
    }

    /// Get the remote-assigned user id
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Get the display name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
