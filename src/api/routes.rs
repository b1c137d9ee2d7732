//! API Routes
//!
//! Configures the Axum router with all cache server endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{get_handler, health_handler, stats_handler, AppState};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/:group/:key` - Fetch a value through a cache group
/// - `GET /stats/:group` - Get a group's statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/:group/:key", get(get_handler))
        .route("/stats/:group", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::GroupRegistry;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let registry = GroupRegistry::new();
        registry.new_group("scores", 1024, |key: &str| -> anyhow::Result<Vec<u8>> {
            Ok(key.as_bytes().to_vec())
        });
        create_router(AppState::new(Arc::new(registry)))
    }

    async fn status_of(uri: &str) -> StatusCode {
        create_test_app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        assert_eq!(status_of("/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stats_endpoint() {
        assert_eq!(status_of("/stats/scores").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_endpoint() {
        assert_eq!(status_of("/api/scores/Tom").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_group_not_found() {
        assert_eq!(status_of("/api/missing/Tom").await, StatusCode::NOT_FOUND);
        assert_eq!(status_of("/stats/missing").await, StatusCode::NOT_FOUND);
    }
}
