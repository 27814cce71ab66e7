//! Per-connection message router.
//!
//! A [`MessageRouter`] owns the session-scoped state of one connection and
//! applies each inbound frame to the shared [`SessionRegistry`].
//!
//! | `type`      | effect                                                    |
//! |-------------|-----------------------------------------------------------|
//! | `join`      | bind connection, register member, reply `joined`          |
//! | `leave`     | deregister member, no notification, binding kept          |
//! | anything else | relay the frame verbatim to the other members           |
//!
//! Closing a joined connection deregisters it and notifies the remaining
//! members with `participantLeft`.

use std::sync::Arc;

use serde::Deserialize;

use super::messages::{self, JoinRequest, ServerMessage};
use crate::domain::{ConnectionHandle, Membership, SessionRegistry};
use crate::error::RelayError;

/// Outcome of routing one inbound frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Routed {
    /// The connection joined a session.
    Joined(Membership),
    /// The member was deregistered; `removed` is `false` if the entry was
    /// already gone.
    Left {
        /// Whether a registry entry was removed.
        removed: bool,
    },
    /// The frame was relayed to `delivered` other members.
    Forwarded {
        /// Number of members the frame was enqueued for.
        delivered: usize,
    },
    /// The connection has not joined a session; nothing happened.
    Ignored,
}

/// Session-scoped state machine for a single connection.
#[derive(Debug)]
pub struct MessageRouter {
    registry: Arc<SessionRegistry>,
    handle: ConnectionHandle,
    membership: Option<Membership>,
}

impl MessageRouter {
    /// Creates a router for a freshly accepted, unjoined connection.
    #[must_use]
    pub fn new(registry: Arc<SessionRegistry>, handle: ConnectionHandle) -> Self {
        Self {
            registry,
            handle,
            membership: None,
        }
    }

    /// Returns the (session, user) binding set by the last `join`, if any.
    #[must_use]
    pub fn membership(&self) -> Option<&Membership> {
        self.membership.as_ref()
    }

    /// Routes one inbound text frame.
    ///
    /// # Errors
    ///
    /// Returns a [`RelayError`] if the frame is not JSON, if a `join` lacks
    /// its ids, or if the confirmation cannot be encoded. Registry state is
    /// unchanged in every error case.
    pub async fn route(&mut self, text: &str) -> Result<Routed, RelayError> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(RelayError::MalformedJson)?;

        // Frames without a string `type` are payloads like any other.
        match messages::message_type(&value) {
            Some(messages::JOIN) => {
                let request = JoinRequest::deserialize(&value).map_err(RelayError::InvalidJoin)?;
                self.join(request).await
            }
            Some(messages::LEAVE) => Ok(self.leave().await),
            _ => Ok(self.forward(text).await),
        }
    }

    async fn join(&mut self, request: JoinRequest) -> Result<Routed, RelayError> {
        let JoinRequest {
            session_id,
            user_id,
        } = request;
        let reply = ServerMessage::Joined {
            session_id: session_id.clone(),
            user_id: user_id.clone(),
        }
        .to_json()
        .map_err(RelayError::Encode)?;

        // Queued first so the joiner sees `joined` before any relayed payload.
        self.handle.send(reply);
        self.registry
            .add_member(&session_id, &user_id, self.handle.clone())
            .await;

        let membership = Membership::new(session_id, user_id);
        tracing::info!(
            connection_id = %self.handle.id(),
            %membership,
            "member joined"
        );
        self.membership = Some(membership.clone());
        Ok(Routed::Joined(membership))
    }

    // The binding is kept after an explicit leave, so a later close still
    // notifies the session.
    async fn leave(&self) -> Routed {
        let Some(membership) = &self.membership else {
            return Routed::Ignored;
        };
        let removed = self
            .registry
            .remove_member(&membership.session_id, &membership.user_id)
            .await;
        tracing::info!(
            connection_id = %self.handle.id(),
            %membership,
            removed,
            "member left"
        );
        Routed::Left { removed }
    }

    async fn forward(&self, text: &str) -> Routed {
        let Some(membership) = &self.membership else {
            return Routed::Ignored;
        };
        let delivered = self
            .registry
            .broadcast(&membership.session_id, &membership.user_id, text)
            .await;
        tracing::trace!(
            session_id = %membership.session_id,
            user_id = %membership.user_id,
            delivered,
            "payload relayed"
        );
        Routed::Forwarded { delivered }
    }

    /// Runs the close path: deregisters the member and tells the rest of
    /// the session with `participantLeft`.
    ///
    /// Does nothing if the connection never joined or its session no
    /// longer exists. Returns the number of members notified.
    pub async fn close(&mut self) -> usize {
        let Some(membership) = self.membership.take() else {
            return 0;
        };
        let Membership {
            session_id,
            user_id,
        } = membership;
        if !self.registry.contains_session(&session_id).await {
            return 0;
        }
        self.registry.remove_member(&session_id, &user_id).await;

        let notice = ServerMessage::ParticipantLeft {
            session_id: session_id.clone(),
            user_id: user_id.clone(),
        };
        let notified = match notice.to_json() {
            Ok(json) => self.registry.broadcast(&session_id, &user_id, &json).await,
            Err(e) => {
                tracing::error!(error = %e, "failed to encode participantLeft");
                0
            }
        };
        tracing::info!(
            connection_id = %self.handle.id(),
            session_id = %session_id,
            user_id = %user_id,
            notified,
            "member disconnected"
        );
        notified
    }
}
