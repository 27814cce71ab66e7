//! Relay error types.
//!
//! [`RelayError`] covers everything that can go wrong while routing a
//! single inbound frame. None of these errors are reported to clients:
//! the connection loop logs them and keeps the connection open.

/// Failure to route a single inbound message.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// The frame is not valid JSON.
    #[error("malformed json: {0}")]
    MalformedJson(#[source] serde_json::Error),

    /// A `join` message without string `sessionId` and `userId` fields.
    #[error("invalid join message: {0}")]
    InvalidJoin(#[source] serde_json::Error),

    /// An outbound message could not be serialized.
    #[error("failed to encode outbound message: {0}")]
    Encode(#[source] serde_json::Error),
}

impl RelayError {
    /// Returns `true` if the error was caused by client input rather than
    /// by the relay itself.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        !matches!(self, Self::Encode(_))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn json_error() -> serde_json::Error {
        let Err(err) = serde_json::from_str::<serde_json::Value>("{") else {
            panic!("expected a parse error");
        };
        err
    }

    #[test]
    fn client_errors_are_classified() {
        assert!(RelayError::MalformedJson(json_error()).is_client_error());
        assert!(RelayError::InvalidJoin(json_error()).is_client_error());
        assert!(!RelayError::Encode(json_error()).is_client_error());
    }

    #[test]
    fn display_names_the_problem() {
        let msg = RelayError::InvalidJoin(json_error()).to_string();
        assert!(msg.starts_with("invalid join"));
        assert!(
            RelayError::MalformedJson(json_error())
                .to_string()
                .starts_with("malformed json")
        );
    }
}
