//! Binding between a connection and a (session, user) pair.

use std::fmt;

/// The session and user a connection joined as.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Membership {
    /// Opaque session key.
    pub session_id: String,
    /// Opaque member key, unique within the session.
    pub user_id: String,
}

impl Membership {
    /// Creates a new membership binding.
    #[must_use]
    pub fn new(session_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            user_id: user_id.into(),
        }
    }
}

impl fmt::Display for Membership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.session_id, self.user_id)
    }
}
