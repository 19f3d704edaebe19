// ABOUTME: Unit tests for JSON-RPC dispatch through the protocol handler
// ABOUTME: Verifies method routing, error shapes, and the id echo invariant
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::uninlined_format_args
)]

mod common;

use anyhow::Result;
use serde_json::{json, Value};

use meta_ads_mcp_server::{
    errors::ToolError,
    jsonrpc::JsonRpcRequest,
    mcp::protocol::ProtocolHandler,
};

use common::{test_context, StubToolExecutor};

fn request(method: &str, params: Option<Value>, id: Value) -> JsonRpcRequest {
    JsonRpcRequest {
        jsonrpc: "2.0".to_owned(),
        method: method.to_owned(),
        params,
        id,
    }
}

#[tokio::test]
async fn initialize_returns_server_info_and_capabilities() -> Result<()> {
    let executor = StubToolExecutor::succeeding();
    let params = json!({
        "clientInfo": { "name": "test-client", "version": "2.3" },
        "protocolVersion": "2025-06-18",
    });

    let response = ProtocolHandler::handle(
        request("initialize", Some(params), json!(1)),
        &executor,
        &test_context(),
    )
    .await;

    assert!(response.error.is_none());
    let result = response.result.expect("initialize result");
    assert_eq!(result["serverInfo"]["name"], "meta-ads-mcp-server");
    assert_eq!(result["protocolVersion"], "2025-06-18");
    assert_eq!(result["capabilities"]["tools"]["listChanged"], false);
    assert_eq!(response.id, json!(1));
    Ok(())
}

#[tokio::test]
async fn malformed_initialize_params_surface_as_internal_error() {
    let executor = StubToolExecutor::succeeding();

    let response = ProtocolHandler::handle(
        request("initialize", Some(json!({ "clientInfo": 42 })), json!(7)),
        &executor,
        &test_context(),
    )
    .await;

    let error = response.error.expect("internal error");
    assert_eq!(error.code, -32603);
    assert_eq!(response.id, json!(7));
}

#[tokio::test]
async fn ping_returns_empty_object() {
    let executor = StubToolExecutor::succeeding();

    let response = ProtocolHandler::handle(
        request("ping", None, json!("ping-1")),
        &executor,
        &test_context(),
    )
    .await;

    assert_eq!(response.result, Some(json!({})));
    assert_eq!(response.id, json!("ping-1"));
}

#[tokio::test]
async fn unknown_method_returns_method_not_found_with_name() {
    let executor = StubToolExecutor::succeeding();

    let response = ProtocolHandler::handle(
        request("resources/list", None, json!(3)),
        &executor,
        &test_context(),
    )
    .await;

    let error = response.error.expect("method not found");
    assert_eq!(error.code, -32601);
    assert!(error.message.contains("resources/list"));
}

#[tokio::test]
async fn notification_id_is_echoed_as_null() {
    let executor = StubToolExecutor::succeeding();

    let response = ProtocolHandler::handle(
        request("ping", None, Value::Null),
        &executor,
        &test_context(),
    )
    .await;

    assert_eq!(response.id, Value::Null);
}

#[tokio::test]
async fn tools_call_success_wraps_result_as_text_content() -> Result<()> {
    let executor = StubToolExecutor::succeeding();
    let params = json!({ "name": "list_ad_accounts", "arguments": { "limit": 5 } });

    let response = ProtocolHandler::handle(
        request("tools/call", Some(params), json!(10)),
        &executor,
        &test_context(),
    )
    .await;

    assert!(response.error.is_none());
    let result = response.result.expect("tools/call result");
    assert_eq!(result["isError"], false);
    assert_eq!(result["content"][0]["type"], "text");
    let payload: Value = serde_json::from_str(result["content"][0]["text"].as_str().unwrap())?;
    assert_eq!(payload["tool"], "list_ad_accounts");
    assert_eq!(payload["arguments"]["limit"], 5);
    Ok(())
}

#[tokio::test]
async fn tool_failure_is_a_successful_response_with_is_error() -> Result<()> {
    let executor =
        StubToolExecutor::failing(ToolError::rate_limited("Graph API throttled the request"));
    let params = json!({ "name": "get_account_insights", "arguments": { "account_id": "111" } });

    let response = ProtocolHandler::handle(
        request("tools/call", Some(params), json!(11)),
        &executor,
        &test_context(),
    )
    .await;

    assert!(response.error.is_none(), "tool failures are not JSON-RPC errors");
    let result = response.result.expect("tools/call result");
    assert_eq!(result["isError"], true);
    let payload: Value = serde_json::from_str(result["content"][0]["text"].as_str().unwrap())?;
    assert_eq!(payload["error"], "Graph API throttled the request");
    assert_eq!(payload["code"], "rate_limited");
    Ok(())
}

#[tokio::test]
async fn unknown_tool_name_returns_method_not_found() {
    let executor = StubToolExecutor::succeeding();
    let params = json!({ "name": "delete_everything", "arguments": {} });

    let response = ProtocolHandler::handle(
        request("tools/call", Some(params), json!(12)),
        &executor,
        &test_context(),
    )
    .await;

    let error = response.error.expect("unknown tool error");
    assert_eq!(error.code, -32601);
    assert!(error.message.contains("delete_everything"));
}

#[tokio::test]
async fn tools_call_without_name_is_invalid_params() {
    let executor = StubToolExecutor::succeeding();

    let response = ProtocolHandler::handle(
        request("tools/call", Some(json!({ "arguments": {} })), json!(13)),
        &executor,
        &test_context(),
    )
    .await;

    let error = response.error.expect("invalid params");
    assert_eq!(error.code, -32602);
}

#[tokio::test]
async fn tools_call_arguments_default_to_empty_object() {
    let executor = StubToolExecutor::succeeding();

    let response = ProtocolHandler::handle(
        request(
            "tools/call",
            Some(json!({ "name": "list_ad_accounts" })),
            json!(14),
        ),
        &executor,
        &test_context(),
    )
    .await;

    assert!(response.error.is_none());
    let result = response.result.expect("result");
    assert_eq!(result["isError"], false);
}
