//! HTTP API layer. The relay exposes only operational endpoints; all
//! session traffic goes over the WebSocket.

pub mod handlers;

use axum::Router;

use crate::app_state::AppState;

/// Builds the router with all plain HTTP endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new().merge(handlers::system::routes())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::api::handlers::system::HealthResponse;
    use crate::domain::ConnectionHandle;

    #[tokio::test]
    async fn health_reports_session_count() {
        let state = AppState::default();
        let (handle, _rx) = ConnectionHandle::channel();
        state.registry.add_member("s1", "alice", handle).await;

        let app = build_router().with_state(state);
        let Ok(request) = Request::builder().uri("/health").body(Body::empty()) else {
            panic!("valid request");
        };
        let Ok(response) = app.oneshot(request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let Ok(bytes) = to_bytes(response.into_body(), usize::MAX).await else {
            panic!("body read failed");
        };
        let Ok(health) = serde_json::from_slice::<HealthResponse>(&bytes) else {
            panic!("health body is not json");
        };
        assert_eq!(health.status, "ok");
        assert_eq!(health.sessions, 1);
        assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
    }
}
