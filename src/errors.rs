// ABOUTME: Unified error handling with tagged variants for transport, protocol, and tool failures
// ABOUTME: Maps each variant to the correct HTTP status and response envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Unified error handling system
//!
//! Errors are discriminated by explicit variants rather than by probing
//! optional fields off caught values. The three layers of the taxonomy:
//!
//! - Transport errors (`InvalidSession`, `NotFound`, `Unauthorized`) become
//!   plain HTTP responses, some wrapped in a JSON-RPC envelope.
//! - Protocol errors (`MethodNotFound`, `InvalidParams`, `Internal`) become
//!   JSON-RPC `error` objects at the dispatch boundary.
//! - Tool errors ([`ToolError`]) never become JSON-RPC errors; the
//!   `tools/call` boundary converts them into `isError: true` content.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::constants::{errors::ERROR_INVALID_SESSION, protocol::JSONRPC_VERSION};

/// Result type used throughout the server
pub type AppResult<T> = Result<T, AppError>;

/// A tool-level failure surfaced by the Tool Adapter
///
/// Carries a human-readable message and a short machine-readable code
/// (`invalid_arguments`, `auth_expired`, `rate_limited`, `not_found`,
/// `network_error`, `graph_api_error`).
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ToolError {
    /// Human-readable description of the failure
    pub message: String,
    /// Short machine-readable error code
    pub code: String,
}

impl ToolError {
    /// Create a tool error with an explicit code
    #[must_use]
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
        }
    }

    /// The supplied arguments were rejected before reaching the Graph API
    #[must_use]
    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::new(message, "invalid_arguments")
    }

    /// The access token was rejected or has expired
    #[must_use]
    pub fn auth_expired(message: impl Into<String>) -> Self {
        Self::new(message, "auth_expired")
    }

    /// The Graph API throttled the request
    #[must_use]
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(message, "rate_limited")
    }

    /// The requested object does not exist or is not visible to this token
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(message, "not_found")
    }

    /// The outbound HTTP request itself failed
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(message, "network_error")
    }

    /// Any other Graph API rejection
    #[must_use]
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(message, "graph_api_error")
    }
}

/// Application-level error with explicit variants per failure layer
#[derive(Debug, Error)]
pub enum AppError {
    /// Request authentication failed before session logic ran
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The `mcp-session-id` header is missing, unknown, or closed
    #[error("Invalid or missing MCP session: {0}")]
    InvalidSession(String),

    /// A session ID collided on creation (should not occur with random IDs)
    #[error("Session already registered: {0}")]
    DuplicateSession(String),

    /// Unknown path or resource
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed client input outside JSON-RPC dispatch
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Server misconfiguration detected at startup
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unexpected internal failure
    #[error("Internal error: {0}")]
    Internal(String),

    /// Tool execution failure (converted at the `tools/call` boundary)
    #[error(transparent)]
    Tool(#[from] ToolError),
}

impl AppError {
    /// Authentication failure
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Session header is missing or does not resolve in the registry
    #[must_use]
    pub fn invalid_session(message: impl Into<String>) -> Self {
        Self::InvalidSession(message.into())
    }

    /// Unknown path or resource
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Malformed client input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Startup configuration failure
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Unexpected internal failure
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized(message) => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": message })),
            )
                .into_response(),
            Self::InvalidSession(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "jsonrpc": JSONRPC_VERSION,
                    "error": {
                        "code": ERROR_INVALID_SESSION,
                        "message": format!("Invalid session: {message}"),
                    },
                    "id": null,
                })),
            )
                .into_response(),
            Self::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
            }
            Self::InvalidInput(message) | Self::DuplicateSession(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            Self::Config(message) | Self::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "jsonrpc": JSONRPC_VERSION,
                    "error": {
                        "code": crate::constants::errors::ERROR_INTERNAL_ERROR,
                        "message": "Internal server error",
                        "data": { "originalError": message },
                    },
                    "id": null,
                })),
            )
                .into_response(),
            Self::Tool(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.message, "code": e.code })),
            )
                .into_response(),
        }
    }
}
