//! shelfwatch-web — read-only status surface.
//!
//! # Routes
//!
//! | Route | Handler |
//! |---|---|
//! | `/` | HTML status panel (auto-refreshing) |
//! | `/api/v1/status` | Current state as JSON |
//! | `/health` | Liveness probe |
//!
//! Handlers only ever read the shared [`WatchState`] via `snapshot()`;
//! they never block the monitor.

pub mod handlers;
pub mod pages;

use axum::Router;
use axum::routing::get;
use shelfwatch_state::WatchState;

/// Shared state for web handlers.
#[derive(Clone)]
pub struct WebState {
    pub watch: WatchState,
    pub product_name: String,
}

/// Build the complete router (dashboard + JSON API + liveness).
pub fn build_router(state: WebState) -> Router {
    let api = Router::new()
        .route("/status", get(handlers::status))
        .with_state(state.clone());

    Router::new()
        .route("/", get(pages::status_page))
        .route("/health", get(handlers::health))
        .with_state(state)
        .nest("/api/v1", api)
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use shelfwatch_state::WatchStatus;
    use tower::ServiceExt;

    fn test_state() -> WebState {
        WebState {
            watch: WatchState::new(),
            product_name: "washed black".to_string(),
        }
    }

    async fn get_body(router: Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let (status, body) = get_body(build_router(test_state()), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }

    #[tokio::test]
    async fn status_json_reflects_state() {
        let state = test_state();
        state
            .watch
            .apply_transition(WatchStatus::Restocked(5), 5, Some("restock detected: 5"))
            .await;

        let (status, body) = get_body(build_router(state), "/api/v1/status").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["product"], "washed black");
        assert_eq!(json["status"], "restocked (stock: 5)");
        assert_eq!(json["stock_count"], 5);
        assert_eq!(json["events"].as_array().unwrap().len(), 1);
        assert!(json["last_check"].is_null());
    }

    #[tokio::test]
    async fn dashboard_renders_product_and_status() {
        let state = test_state();
        state
            .watch
            .apply_transition(WatchStatus::Holding(3), 3, None)
            .await;

        let (status, body) = get_body(build_router(state), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("washed black"));
        assert!(body.contains("holding (stock: 3)"));
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let (status, _) = get_body(build_router(test_state()), "/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
