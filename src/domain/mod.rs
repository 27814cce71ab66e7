//! Domain layer: connection handles, memberships, and the session registry.
//!
//! The registry is the only shared mutable state in the relay. Everything
//! else is owned by a single connection task.

pub mod connection;
pub mod membership;
pub mod session_registry;

pub use connection::{ConnectionHandle, ConnectionId};
pub use membership::Membership;
pub use session_registry::SessionRegistry;
