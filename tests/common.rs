// ABOUTME: Shared test utilities for the MCP server integration tests
// ABOUTME: Provides stub resolver/executor implementations and HTTP request helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::uninlined_format_args
)]
//! Shared test utilities for `meta_ads_mcp_server`

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use meta_ads_mcp_server::{
    auth::{CredentialContext, CredentialResolver},
    config::ServerConfig,
    errors::{AppError, AppResult, ToolError},
    mcp::{resources::ServerResources, session::SessionRegistry},
    server::McpHttpServer,
    tools::{ToolExecutor, ToolId, ToolOutcome},
};

/// Token the stub resolver accepts
pub const VALID_TOKEN: &str = "test-access-token";

/// User ID the stub resolver reports
pub const TEST_USER_ID: &str = "1000123";

pub fn test_context() -> CredentialContext {
    CredentialContext {
        access_token: VALID_TOKEN.to_owned(),
        user_id: TEST_USER_ID.to_owned(),
        ad_account_ids: vec!["act_111".to_owned(), "act_222".to_owned()],
    }
}

/// Accepts exactly [`VALID_TOKEN`], rejects everything else
pub struct StubCredentialResolver;

#[async_trait]
impl CredentialResolver for StubCredentialResolver {
    async fn resolve(&self, token: &str) -> AppResult<CredentialContext> {
        if token == VALID_TOKEN {
            Ok(test_context())
        } else {
            Err(AppError::unauthorized("Invalid access token"))
        }
    }
}

/// Canned tool executor; echoes the call on success or fails uniformly
pub struct StubToolExecutor {
    fail_with: Option<ToolError>,
}

impl StubToolExecutor {
    pub fn succeeding() -> Self {
        Self { fail_with: None }
    }

    pub fn failing(error: ToolError) -> Self {
        Self {
            fail_with: Some(error),
        }
    }
}

#[async_trait]
impl ToolExecutor for StubToolExecutor {
    async fn execute(
        &self,
        tool: ToolId,
        args: &Value,
        ctx: &CredentialContext,
    ) -> std::result::Result<ToolOutcome, ToolError> {
        if let Some(error) = &self.fail_with {
            return Err(error.clone());
        }
        Ok(ToolOutcome {
            value: json!({
                "tool": tool.name(),
                "arguments": args,
                "userId": ctx.user_id,
            }),
            cached: Some(false),
        })
    }
}

/// Build server resources over the stub resolver and the given executor
pub fn create_test_resources(executor: Arc<dyn ToolExecutor>) -> Arc<ServerResources> {
    Arc::new(ServerResources::new(
        ServerConfig::default(),
        Arc::new(SessionRegistry::new()),
        Arc::new(StubCredentialResolver),
        executor,
    ))
}

/// Full application router over stub resources
pub fn test_router(executor: Arc<dyn ToolExecutor>) -> Router {
    McpHttpServer::new(create_test_resources(executor)).router()
}

/// POST a JSON-RPC body to `/mcp` with the given token and session header
pub fn mcp_post(token: Option<&str>, session_id: Option<&str>, body: &Value) -> Request<Body> {
    let uri = match token {
        Some(token) => format!("/mcp?token={token}"),
        None => "/mcp".to_owned(),
    };
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(session_id) = session_id {
        builder = builder.header("mcp-session-id", session_id);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Build a GET or DELETE request against `/mcp`
pub fn mcp_request(
    method: &str,
    token: Option<&str>,
    session_id: Option<&str>,
) -> Request<Body> {
    let uri = match token {
        Some(token) => format!("/mcp?token={token}"),
        None => "/mcp".to_owned(),
    };
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(session_id) = session_id {
        builder = builder.header("mcp-session-id", session_id);
    }
    builder.body(Body::empty()).unwrap()
}

/// Drive one request through the router and decode the JSON body
pub async fn send(router: &Router, request: Request<Body>) -> Result<(StatusCode, HeaderMap, Value)> {
    let response = router.clone().oneshot(request).await?;
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, headers, body))
}

/// Run a header-less initialize and return the issued session ID
pub async fn initialize_session(router: &Router) -> Result<String> {
    let body = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "initialize",
        "params": {
            "clientInfo": { "name": "test", "version": "1.0" },
            "protocolVersion": "2025-06-18",
        },
    });
    let (status, headers, _) = send(router, mcp_post(Some(VALID_TOKEN), None, &body)).await?;
    assert_eq!(status, StatusCode::OK);
    let session_id = headers
        .get("mcp-session-id")
        .and_then(|value| value.to_str().ok())
        .expect("initialize must issue a session header")
        .to_owned();
    Ok(session_id)
}
