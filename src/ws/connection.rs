//! WebSocket connection loop.
//!
//! Each accepted socket is split in two. A writer task drains the
//! connection's outbound queue into the sink, while the read loop feeds
//! inbound text frames to a [`MessageRouter`]. When either side ends, the
//! router's close path runs and the writer is stopped.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};

use super::router::MessageRouter;
use crate::domain::{ConnectionHandle, SessionRegistry};

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Routes text frames from the client through a [`MessageRouter`].
/// - Writes everything queued on the connection's handle to the client.
pub async fn run_connection(socket: WebSocket, registry: Arc<SessionRegistry>) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (handle, mut outbound_rx) = ConnectionHandle::channel();
    let connection_id = handle.id();
    let mut router = MessageRouter::new(registry, handle);

    let mut writer = tokio::spawn(async move {
        while let Some(frame) = outbound_rx.recv().await {
            if ws_tx.send(Message::text(frame)).await.is_err() {
                break;
            }
        }
    });

    tracing::debug!(%connection_id, "ws connection opened");

    loop {
        tokio::select! {
            // Incoming frame from client
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        match router.route(text.as_str()).await {
                            Ok(routed) => {
                                tracing::trace!(%connection_id, ?routed, "frame routed");
                            }
                            Err(e) if e.is_client_error() => {
                                tracing::warn!(%connection_id, error = %e, "discarding inbound message");
                            }
                            Err(e) => {
                                tracing::error!(%connection_id, error = %e, "failed to route message");
                            }
                        }
                    }
                    Some(Ok(Message::Binary(_))) => {
                        tracing::debug!(%connection_id, "ignoring binary frame");
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        tracing::debug!(%connection_id, error = %e, "ws read failed");
                        break;
                    }
                    _ => {}
                }
            }
            // Writer stopped: the sink is gone
            _ = &mut writer => break,
        }
    }

    router.close().await;
    writer.abort();

    tracing::debug!(%connection_id, "ws connection closed");
}
