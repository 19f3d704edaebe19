// ABOUTME: Application constants shared across the MCP protocol and transport layers
// ABOUTME: Centralizes protocol identifiers, error codes, and header names
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Application constants and protocol identifiers

/// Service name identifiers
pub mod service_names {
    /// Canonical server name reported by `initialize` and `/health`
    pub const META_ADS_MCP_SERVER: &str = "meta-ads-mcp-server";
}

/// MCP protocol constants
pub mod protocol {
    /// JSON-RPC protocol version string
    pub const JSONRPC_VERSION: &str = "2.0";

    /// MCP protocol revision this server implements
    pub const MCP_PROTOCOL_VERSION: &str = "2025-06-18";

    /// Header carrying the session ID on every request after `initialize`
    pub const SESSION_HEADER: &str = "mcp-session-id";
}

/// JSON-RPC error codes
pub mod errors {
    /// Method not found (JSON-RPC standard)
    pub const ERROR_METHOD_NOT_FOUND: i32 = -32601;

    /// Invalid params (JSON-RPC standard)
    pub const ERROR_INVALID_PARAMS: i32 = -32602;

    /// Internal error (JSON-RPC standard)
    pub const ERROR_INTERNAL_ERROR: i32 = -32603;

    /// Invalid or missing session (server-defined)
    pub const ERROR_INVALID_SESSION: i32 = -32000;
}

/// Meta Graph API defaults
pub mod graph_api {
    /// Default Graph API base URL
    pub const DEFAULT_BASE_URL: &str = "https://graph.facebook.com";

    /// Default Graph API version segment
    pub const DEFAULT_API_VERSION: &str = "v21.0";

    /// Default request timeout in seconds for outbound Graph calls
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Default response cache capacity (entries)
    pub const DEFAULT_CACHE_CAPACITY: usize = 256;

    /// Default response cache TTL in seconds
    pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;
}

/// Server version from Cargo metadata
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
