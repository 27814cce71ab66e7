//! WebSocket message shapes.
//!
//! Frames are JSON, normally objects with a string `type` discriminator.
//! Only `join` and `leave` are interpreted by the relay; anything else is an
//! application payload relayed verbatim.

use serde::{Deserialize, Serialize};

/// `type` of the client → server join request.
pub const JOIN: &str = "join";
/// `type` of the client → server leave request.
pub const LEAVE: &str = "leave";

/// Fields of a `join` request.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    /// Session to join.
    pub session_id: String,
    /// Member key inside the session.
    pub user_id: String,
}

/// Messages the relay itself originates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    /// Join confirmation, sent only to the joining connection.
    Joined {
        /// Session that was joined.
        #[serde(rename = "sessionId")]
        session_id: String,
        /// Member key the connection joined as.
        #[serde(rename = "userId")]
        user_id: String,
    },
    /// Sent to the remaining members when a joined connection closes.
    ParticipantLeft {
        /// Session the member left.
        #[serde(rename = "sessionId")]
        session_id: String,
        /// Member key of the departed connection.
        #[serde(rename = "userId")]
        user_id: String,
    },
}

impl ServerMessage {
    /// Serializes the message as a JSON text frame.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Extracts the `type` discriminator from a parsed frame.
///
/// Returns `None` unless `value` is an object whose `type` is a string.
#[must_use]
pub fn message_type(value: &serde_json::Value) -> Option<&str> {
    value.as_object()?.get("type")?.as_str()
}
