//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::{CacheError, Result};
use crate::group::{Group, GroupRegistry};
use crate::models::{GetResponse, HealthResponse, StatsResponse};

/// Application state shared across all handlers.
///
/// Holds the group registry; each group does its own locking.
#[derive(Clone)]
pub struct AppState {
    /// Registry of servable groups
    pub registry: Arc<GroupRegistry>,
}

impl AppState {
    /// Creates a new AppState over the given registry.
    pub fn new(registry: Arc<GroupRegistry>) -> Self {
        Self { registry }
    }

    fn group(&self, name: &str) -> Result<Arc<Group>> {
        self.registry
            .get_group(name)
            .ok_or_else(|| CacheError::GroupNotFound(name.to_string()))
    }
}

/// Handler for GET /api/:group/:key
///
/// Serves a value from the named group, loading it on a miss. Loaders are
/// blocking, so the lookup runs on the blocking thread pool.
pub async fn get_handler(
    State(state): State<AppState>,
    Path((group_name, key)): Path<(String, String)>,
) -> Result<Json<GetResponse>> {
    let group = state.group(&group_name)?;

    let lookup_key = key.clone();
    let value = tokio::task::spawn_blocking(move || group.get(&lookup_key))
        .await
        .map_err(|e| CacheError::Internal(format!("lookup task failed: {e}")))??;

    Ok(Json(GetResponse::new(group_name, key, value.to_string())))
}

/// Handler for GET /stats/:group
///
/// Returns the named group's statistics.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(group_name): Path<String>,
) -> Result<Json<StatsResponse>> {
    let group = state.group(&group_name)?;
    Ok(Json(StatsResponse::new(group_name, group.stats())))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> AppState {
        let registry = GroupRegistry::new();
        registry.new_group("scores", 1024, |key: &str| -> anyhow::Result<Vec<u8>> {
            match key {
                "Tom" => Ok(b"630".to_vec()),
                _ => anyhow::bail!("{key} not exist"),
            }
        });
        AppState::new(Arc::new(registry))
    }

    fn path(group: &str, key: &str) -> Path<(String, String)> {
        Path((group.to_string(), key.to_string()))
    }

    #[tokio::test]
    async fn test_get_handler_loads_value() {
        let state = test_state();

        let response = tokio_test::assert_ok!(get_handler(State(state), path("scores", "Tom")).await);
        assert_eq!(response.group, "scores");
        assert_eq!(response.key, "Tom");
        assert_eq!(response.value, "630");
    }

    #[tokio::test]
    async fn test_get_handler_unknown_group() {
        let state = test_state();

        let result = get_handler(State(state), path("nope", "Tom")).await;
        assert!(matches!(result, Err(CacheError::GroupNotFound(_))));
    }

    #[tokio::test]
    async fn test_get_handler_loader_error() {
        let state = test_state();

        let err = tokio_test::assert_err!(get_handler(State(state), path("scores", "Jerry")).await);
        assert!(matches!(err, CacheError::Load { .. }));
        assert_eq!(err.load_error().unwrap().to_string(), "Jerry not exist");
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = test_state();
        get_handler(State(state.clone()), path("scores", "Tom"))
            .await
            .unwrap();
        get_handler(State(state.clone()), path("scores", "Tom"))
            .await
            .unwrap();

        let response = stats_handler(State(state), Path("scores".to_string()))
            .await
            .unwrap();
        assert_eq!(response.stats.hits, 1);
        assert_eq!(response.stats.misses, 1);
        assert_eq!(response.stats.loads, 1);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
