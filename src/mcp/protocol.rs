// ABOUTME: Pure transport-agnostic JSON-RPC dispatch for the four MCP methods
// ABOUTME: Converts tool failures into isError content and everything else into JSON-RPC errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Protocol handler
//!
//! Given a parsed request, a [`ToolExecutor`], and a [`CredentialContext`],
//! produces a response object. Holds no session state; the transport layer
//! owns sessions and calls in here per request.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::auth::CredentialContext;
use crate::jsonrpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
use crate::mcp::schema::{InitializeParams, InitializeResult, ToolCallParams, ToolCallResult};
use crate::tools::{catalog, ToolExecutor, ToolId};

/// Stateless JSON-RPC dispatcher
pub struct ProtocolHandler;

impl ProtocolHandler {
    /// Dispatch one request to the matching method handler.
    ///
    /// Never fails: every failure path is converted into a well-formed
    /// response so a single bad request cannot drop the connection.
    #[tracing::instrument(
        skip(request, executor, ctx),
        fields(method = %request.method, request_id = %request.id)
    )]
    pub async fn handle(
        request: JsonRpcRequest,
        executor: &dyn ToolExecutor,
        ctx: &CredentialContext,
    ) -> JsonRpcResponse {
        let id = request.id.clone();
        match request.method.as_str() {
            "initialize" => Self::handle_initialize(id, request.params),
            "tools/list" => Self::handle_tools_list(id),
            "tools/call" => Self::handle_tools_call(id, request.params, executor, ctx).await,
            "ping" => JsonRpcResponse::success(id, serde_json::json!({})),
            other => {
                debug!("Unrecognized method: {other}");
                JsonRpcResponse::error(id, JsonRpcError::method_not_found(other))
            }
        }
    }

    /// Malformed initialize params propagate as `INTERNAL_ERROR`; the method
    /// itself has no expected failure mode.
    fn handle_initialize(id: Value, params: Option<Value>) -> JsonRpcResponse {
        let parsed: Result<InitializeParams, _> =
            serde_json::from_value(params.unwrap_or(Value::Null));
        match parsed {
            Ok(init) => {
                info!(
                    client = %init.client_info.name,
                    client_version = %init.client_info.version,
                    client_protocol = %init.protocol_version,
                    "Client initialized"
                );
                Self::serialize_result(id, &InitializeResult::current())
            }
            Err(e) => JsonRpcResponse::error(
                id,
                JsonRpcError::internal(format!("Malformed initialize params: {e}")),
            ),
        }
    }

    fn handle_tools_list(id: Value) -> JsonRpcResponse {
        Self::serialize_result(id, &serde_json::json!({ "tools": catalog() }))
    }

    async fn handle_tools_call(
        id: Value,
        params: Option<Value>,
        executor: &dyn ToolExecutor,
        ctx: &CredentialContext,
    ) -> JsonRpcResponse {
        let parsed: Result<ToolCallParams, _> =
            serde_json::from_value(params.unwrap_or(Value::Null));
        let call = match parsed {
            Ok(call) => call,
            Err(e) => {
                return JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params(format!("Invalid tools/call params: {e}")),
                );
            }
        };

        let Some(tool) = ToolId::from_name(&call.name) else {
            return JsonRpcResponse::error(
                id,
                JsonRpcError {
                    code: crate::constants::errors::ERROR_METHOD_NOT_FOUND,
                    message: format!("Unknown tool: {}", call.name),
                    data: None,
                },
            );
        };

        // Tool-execution boundary: failures become isError content, never
        // JSON-RPC errors.
        let result = match executor.execute(tool, &call.arguments, ctx).await {
            Ok(outcome) => {
                if outcome.cached == Some(true) {
                    info!(tool = tool.name(), "Tool result served from cache");
                }
                ToolCallResult::success(&outcome.value)
            }
            Err(e) => {
                warn!(
                    tool = tool.name(),
                    code = %e.code,
                    "Tool execution failed: {}", e.message
                );
                ToolCallResult::failure(&e.message, &e.code)
            }
        };

        Self::serialize_result(id, &result)
    }

    fn serialize_result<T: serde::Serialize>(id: Value, result: &T) -> JsonRpcResponse {
        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => JsonRpcResponse::error(
                id,
                JsonRpcError::internal(format!("Failed to serialize result: {e}")),
            ),
        }
    }
}
