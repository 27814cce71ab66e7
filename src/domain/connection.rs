//! Connection identity and outbound handles.
//!
//! A [`ConnectionHandle`] is the sending half of a connection's outbound
//! queue. The connection's writer task owns the receiving half and drains
//! it into the socket; once that task stops, the handle reports itself
//! closed and further sends are skipped.

use std::fmt;

use tokio::sync::mpsc;

/// Unique identifier for a physical client connection.
///
/// Wraps a UUID v4 generated when the connection is accepted. Only used
/// for log correlation; session membership is keyed by user id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(uuid::Uuid);

impl ConnectionId {
    /// Creates a new random `ConnectionId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Addressable endpoint of a live client connection.
///
/// Cloning a handle is cheap; every clone feeds the same outbound queue.
///
/// The queue is unbounded: a peer that stops reading keeps accumulating
/// frames until its socket errors or closes and the writer task exits.
/// Backpressure is left to the transport.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    id: ConnectionId,
    outbound: mpsc::UnboundedSender<String>,
}

impl ConnectionHandle {
    /// Creates a handle together with the receiver its writer task drains.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (outbound, rx) = mpsc::unbounded_channel();
        let handle = Self {
            id: ConnectionId::new(),
            outbound,
        };
        (handle, rx)
    }

    /// Returns the connection identifier.
    #[must_use]
    pub const fn id(&self) -> ConnectionId {
        self.id
    }

    /// Returns `true` while the connection's writer is still accepting frames.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.outbound.is_closed()
    }

    /// Enqueues a text frame without waiting for delivery.
    ///
    /// Returns `false` if the connection closed before the frame could be
    /// queued.
    pub fn send(&self, payload: impl Into<String>) -> bool {
        self.outbound.send(payload.into()).is_ok()
    }
}
