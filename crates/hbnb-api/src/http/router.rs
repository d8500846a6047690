//! Axum router configuration with middleware.
//!
//! The route group is mounted at `/api/v1`; endpoint handlers are
//! registered into it here. Middleware: CORS, tracing. Unknown paths get a
//! JSON 404 body.

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/status", get(handlers::index::status))
        .route("/stats", get(handlers::index::stats));

    Router::new()
        .nest("/api/v1", api_routes)
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use hbnb_types::config::{RuntimeEnv, StorageConfig};
    use hbnb_types::state::State;
    use hbnb_types::user::User;

    async fn test_state() -> AppState {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("api.db").display());
        // Leak tempdir so the database file lives for the test
        std::mem::forget(dir);
        AppState::init(&StorageConfig::with_url(url, RuntimeEnv::Dev))
            .await
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_status_endpoint() {
        let router = build_router(test_state().await);

        let response = router
            .oneshot(Request::get("/api/v1/status").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "status": "OK" }));
    }

    #[tokio::test]
    async fn test_stats_counts_per_kind() {
        let state = test_state().await;
        {
            let mut storage = state.storage.lock().await;
            storage.new(State::new("Oregon")).unwrap();
            storage.new(User::new("betty@example.com", "pwd")).unwrap();
            storage.save().await.unwrap();
        }

        let router = build_router(state);
        let response = router
            .oneshot(Request::get("/api/v1/stats").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let value = body_json(response).await;
        assert_eq!(value["states"], 1);
        assert_eq!(value["users"], 1);
        assert_eq!(value["amenities"], 0);
        assert_eq!(value["cities"], 0);
        assert_eq!(value["places"], 0);
        assert_eq!(value["reviews"], 0);
    }

    #[tokio::test]
    async fn test_stats_after_close_is_unavailable() {
        let state = test_state().await;
        state.storage.lock().await.close();

        let router = build_router(state);
        let response = router
            .oneshot(Request::get("/api/v1/stats").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_unknown_path_gets_json_404() {
        let router = build_router(test_state().await);

        let response = router
            .oneshot(Request::get("/api/v1/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({ "error": "Not found" }));
    }
}
