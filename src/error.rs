//! Error types for cache groups
//!
//! Provides unified error handling using thiserror. Loader failures keep the
//! loader's own error as their source, untouched.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for cache groups and the HTTP surface.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Empty key passed to a group lookup
    #[error("key is required")]
    EmptyKey,

    /// The group's loader failed for this key
    #[error("failed to load key '{key}': {source}")]
    Load {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// No group registered under this name
    #[error("Group not found: {0}")]
    GroupNotFound(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CacheError {
    /// Returns the loader's error when this is a load failure.
    pub fn load_error(&self) -> Option<&anyhow::Error> {
        match self {
            CacheError::Load { source, .. } => Some(source),
            _ => None,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::EmptyKey => StatusCode::BAD_REQUEST,
            CacheError::GroupNotFound(_) => StatusCode::NOT_FOUND,
            CacheError::Load { .. } => StatusCode::BAD_GATEWAY,
            CacheError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache groups.
pub type Result<T> = std::result::Result<T, CacheError>;
