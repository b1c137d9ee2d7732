//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Byte budget of the served group's cache (0 = unbounded)
    pub cache_bytes: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Name the demo group is registered under
    pub group_name: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_BYTES` - Group byte budget (default: 2097152)
    /// - `SERVER_PORT` - HTTP server port (default: 9999)
    /// - `GROUP_NAME` - Demo group name (default: "scores")
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_bytes: env::var("CACHE_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_bytes),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            group_name: env::var("GROUP_NAME")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.group_name),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_bytes: 2 << 20,
            server_port: 9999,
            group_name: "scores".to_string(),
        }
    }
}
