//! Configuration for the reservation client.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend configuration
    pub backend: BackendConfig,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Reservation backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the reservation backend
    pub base_url: String,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            backend: BackendConfig {
                base_url: env::var("ROOMBOOK_BACKEND_URL")
                    .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            },
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }
}
