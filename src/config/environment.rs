// ABOUTME: Environment-driven server configuration loaded once at startup
// ABOUTME: Covers HTTP bind address, Graph API client settings, and session TTL policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment-based configuration
//!
//! | Variable | Default | Purpose |
//! |---|---|---|
//! | `MCP_HOST` | `127.0.0.1` | HTTP bind host |
//! | `MCP_HTTP_PORT` | `8765` | HTTP bind port |
//! | `MCP_SESSION_TTL_SECS` | `0` | Idle session TTL; `0` disables the reaper |
//! | `GRAPH_API_BASE_URL` | `https://graph.facebook.com` | Graph API origin |
//! | `GRAPH_API_VERSION` | `v21.0` | Graph API version segment |
//! | `GRAPH_API_TIMEOUT_SECS` | `30` | Outbound request timeout |
//! | `GRAPH_CACHE_CAPACITY` | `256` | Response cache entries |
//! | `GRAPH_CACHE_TTL_SECS` | `300` | Response cache TTL; `0` disables caching |

use std::env;

use crate::constants::graph_api;
use crate::errors::{AppError, AppResult};

/// Graph API client configuration
#[derive(Debug, Clone)]
pub struct GraphApiConfig {
    /// Graph API origin, e.g. `https://graph.facebook.com`
    pub base_url: String,
    /// Version path segment, e.g. `v21.0`
    pub api_version: String,
    /// Outbound request timeout in seconds
    pub timeout_secs: u64,
    /// Response cache capacity in entries
    pub cache_capacity: usize,
    /// Response cache TTL in seconds; `0` disables caching
    pub cache_ttl_secs: u64,
}

impl Default for GraphApiConfig {
    fn default() -> Self {
        Self {
            base_url: graph_api::DEFAULT_BASE_URL.to_owned(),
            api_version: graph_api::DEFAULT_API_VERSION.to_owned(),
            timeout_secs: graph_api::DEFAULT_TIMEOUT_SECS,
            cache_capacity: graph_api::DEFAULT_CACHE_CAPACITY,
            cache_ttl_secs: graph_api::DEFAULT_CACHE_TTL_SECS,
        }
    }
}

/// Top-level server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP bind host
    pub host: String,
    /// HTTP bind port
    pub http_port: u16,
    /// Idle session TTL in seconds; `0` means sessions never expire
    /// (the documented baseline behavior)
    pub session_ttl_secs: u64,
    /// Graph API client settings
    pub graph_api: GraphApiConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            http_port: 8765,
            session_ttl_secs: 0,
            graph_api: GraphApiConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Returns `AppError::Config` when a variable is present but unparseable.
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();

        Ok(Self {
            host: env_or("MCP_HOST", defaults.host),
            http_port: parse_env("MCP_HTTP_PORT", defaults.http_port)?,
            session_ttl_secs: parse_env("MCP_SESSION_TTL_SECS", defaults.session_ttl_secs)?,
            graph_api: GraphApiConfig {
                base_url: env_or("GRAPH_API_BASE_URL", defaults.graph_api.base_url),
                api_version: env_or("GRAPH_API_VERSION", defaults.graph_api.api_version),
                timeout_secs: parse_env(
                    "GRAPH_API_TIMEOUT_SECS",
                    defaults.graph_api.timeout_secs,
                )?,
                cache_capacity: parse_env(
                    "GRAPH_CACHE_CAPACITY",
                    defaults.graph_api.cache_capacity,
                )?,
                cache_ttl_secs: parse_env(
                    "GRAPH_CACHE_TTL_SECS",
                    defaults.graph_api.cache_ttl_secs,
                )?,
            },
        })
    }
}

fn env_or(key: &str, default: String) -> String {
    env::var(key).unwrap_or(default)
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> AppResult<T> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::config(format!("Invalid value for {key}: {raw}"))),
        Err(_) => Ok(default),
    }
}
