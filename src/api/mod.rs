//! API Module
//!
//! HTTP handlers and routing that expose cache groups over HTTP.
//!
//! # Endpoints
//! - `GET /api/:group/:key` - Fetch a value through a cache group
//! - `GET /stats/:group` - Get a group's statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
