// ABOUTME: JSON-RPC 2.0 request, response, and error types shared by all MCP methods
// ABOUTME: Provides constructors that preserve the request ID echo invariant
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Unified JSON-RPC 2.0 foundation
//!
//! The response `id` always echoes the request `id` unchanged, including
//! `null` for notifications that still expect acknowledgment in this design.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{
    errors::{
        ERROR_INTERNAL_ERROR, ERROR_INVALID_PARAMS, ERROR_INVALID_SESSION, ERROR_METHOD_NOT_FOUND,
    },
    protocol::JSONRPC_VERSION,
};

/// A JSON-RPC 2.0 request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol version, always `"2.0"`
    pub jsonrpc: String,
    /// Method name, e.g. `tools/call`
    pub method: String,
    /// Optional method parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    /// Request ID; `Value::Null` for notifications
    #[serde(default)]
    pub id: Value,
}

/// A JSON-RPC 2.0 response carrying either `result` or `error`, never both
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Protocol version, always `"2.0"`
    pub jsonrpc: String,
    /// Successful result payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    /// Echo of the request ID, `null` included
    pub id: Value,
}

/// A JSON-RPC 2.0 error object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Numeric error code (standard or server-defined)
    pub code: i32,
    /// Human-readable error message
    pub message: String,
    /// Optional structured error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    /// Build a success response echoing the request ID
    #[must_use]
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_owned(),
            result: Some(result),
            error: None,
            id,
        }
    }

    /// Build an error response echoing the request ID
    #[must_use]
    pub fn error(id: Value, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_owned(),
            result: None,
            error: Some(error),
            id,
        }
    }
}

impl JsonRpcError {
    /// Method not found, message includes the unrecognized method name
    #[must_use]
    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: ERROR_METHOD_NOT_FOUND,
            message: format!("Method not found: {method}"),
            data: None,
        }
    }

    /// Invalid params at the dispatch boundary
    #[must_use]
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self {
            code: ERROR_INVALID_PARAMS,
            message: message.into(),
            data: None,
        }
    }

    /// Internal error carrying the original error text in `data.originalError`
    #[must_use]
    pub fn internal(original: impl Into<String>) -> Self {
        Self {
            code: ERROR_INTERNAL_ERROR,
            message: "Internal error".to_owned(),
            data: Some(serde_json::json!({ "originalError": original.into() })),
        }
    }

    /// Invalid or missing session (server-defined `-32000`)
    #[must_use]
    pub fn invalid_session(message: impl Into<String>) -> Self {
        Self {
            code: ERROR_INVALID_SESSION,
            message: message.into(),
            data: None,
        }
    }
}
