//! WebSocket layer: upgrade handling, connection loop, message routing.
//!
//! Clients join a session with `{"type":"join","sessionId":..,"userId":..}`
//! and every other frame they send is relayed to the rest of the session.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod router;

pub use router::{MessageRouter, Routed};
