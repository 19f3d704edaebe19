// ABOUTME: MCP wire schema types for initialize, capabilities, and tool results
// ABOUTME: Serialized with camelCase field names as the protocol requires
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! MCP wire schema types

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{protocol::MCP_PROTOCOL_VERSION, service_names::META_ADS_MCP_SERVER};

/// Client identification sent with `initialize`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInfo {
    /// Client name
    pub name: String,
    /// Client version
    pub version: String,
}

/// Parameters of the `initialize` method
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    /// Client identification
    pub client_info: ClientInfo,
    /// Protocol revision the client speaks
    pub protocol_version: String,
}

/// Server identification returned by `initialize`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Server name
    pub name: String,
    /// Server version
    pub version: String,
}

/// Tool capability flags
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCapabilities {
    /// Whether the catalog can change mid-session (it cannot)
    pub list_changed: bool,
}

/// Server capability advertisement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerCapabilities {
    /// Tool-related capabilities
    pub tools: ToolCapabilities,
}

/// Result of the `initialize` method
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    /// Protocol revision the server implements
    pub protocol_version: String,
    /// Capability advertisement
    pub capabilities: ServerCapabilities,
    /// Server identification
    pub server_info: ServerInfo,
}

impl InitializeResult {
    /// Build the static initialize result for this server
    #[must_use]
    pub fn current() -> Self {
        Self {
            protocol_version: MCP_PROTOCOL_VERSION.to_owned(),
            capabilities: ServerCapabilities {
                tools: ToolCapabilities {
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: META_ADS_MCP_SERVER.to_owned(),
                version: crate::constants::SERVER_VERSION.to_owned(),
            },
        }
    }
}

/// One typed content block in a tool result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    /// Plain text content
    Text {
        /// The text payload
        text: String,
    },
}

/// Result payload of `tools/call`
///
/// A tool failure is reported as a successful JSON-RPC response with
/// `is_error: true`; only protocol-level failures become JSON-RPC errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    /// Ordered content blocks
    pub content: Vec<ContentBlock>,
    /// Distinguishes tool-level failure from success
    pub is_error: bool,
}

impl ToolCallResult {
    /// Wrap a normalized tool result as pretty-printed text content
    #[must_use]
    pub fn success(value: &Value) -> Self {
        let text = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
        Self {
            content: vec![ContentBlock::Text { text }],
            is_error: false,
        }
    }

    /// Wrap a tool failure as `{error, code}` text content
    #[must_use]
    pub fn failure(message: &str, code: &str) -> Self {
        let payload = serde_json::json!({ "error": message, "code": code });
        let text =
            serde_json::to_string_pretty(&payload).unwrap_or_else(|_| payload.to_string());
        Self {
            content: vec![ContentBlock::Text { text }],
            is_error: true,
        }
    }
}

/// Parameters of the `tools/call` method
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallParams {
    /// Tool name from the catalog
    pub name: String,
    /// Tool arguments; defaults to an empty object
    #[serde(default = "empty_object")]
    pub arguments: Value,
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}
