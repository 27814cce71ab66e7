//! # session-relay
//!
//! Minimal WebSocket relay: clients join named sessions and every message
//! they send is fanned out to the other members of the same session.
//!
//! ## Architecture
//!
//! ```text
//! Clients (WebSocket)
//!     │
//!     ├── WS Handler (ws/handler)
//!     ├── Connection loop + writer task (ws/connection)
//!     │
//!     ├── MessageRouter, one per connection (ws/router)
//!     │
//!     └── SessionRegistry, shared (domain/)
//! ```
//!
//! `GET /health` is served alongside the WebSocket endpoint.

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod ws;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::ws::handler::ws_handler;

/// Builds the complete application router: health endpoint plus the
/// WebSocket upgrade on `/ws` and `/`.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(api::build_router())
        .route("/", get(ws_handler))
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
