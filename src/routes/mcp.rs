// ABOUTME: Streamable HTTP transport for the MCP endpoints on /mcp
// ABOUTME: POST carries JSON-RPC, GET opens the SSE stream, DELETE terminates the session
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! MCP transport routes
//!
//! Session binding rules for `POST /mcp`:
//! - a known `mcp-session-id` header resolves to its registered session;
//! - a header-less `initialize` creates a fresh session and returns its ID
//!   in the response header;
//! - anything else is rejected with JSON-RPC code `-32000` and HTTP 400.
//!
//! Dispatch runs inside a spawned task so a panicking handler produces a
//! `-32603` envelope instead of tearing down the connection.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header::HeaderValue, HeaderMap, StatusCode},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::{json, Value};
use tracing::{error, info, warn};

use crate::auth::CredentialContext;
use crate::constants::{
    protocol::{MCP_PROTOCOL_VERSION, SESSION_HEADER},
    service_names::META_ADS_MCP_SERVER,
    SERVER_VERSION,
};
use crate::errors::{AppError, AppResult};
use crate::jsonrpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
use crate::mcp::protocol::ProtocolHandler;
use crate::mcp::resources::ServerResources;
use crate::mcp::session::{Session, SessionRegistry};
use crate::middleware::auth_middleware;
use crate::tools::catalog;

/// MCP transport routes
pub struct McpRoutes;

impl McpRoutes {
    /// Build the `/mcp` router with authentication applied to the transport
    /// endpoints; `/mcp/info` stays open.
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        let transport = Router::new()
            .route(
                "/mcp",
                post(Self::handle_post)
                    .get(Self::handle_get)
                    .delete(Self::handle_delete),
            )
            .layer(axum::middleware::from_fn_with_state(
                resources.clone(),
                auth_middleware,
            ));

        Router::new()
            .route("/mcp/info", get(Self::handle_info))
            .merge(transport)
            .with_state(resources)
    }

    /// One JSON-RPC request per POST body
    async fn handle_post(
        State(resources): State<Arc<ServerResources>>,
        Extension(ctx): Extension<CredentialContext>,
        headers: HeaderMap,
        body: Bytes,
    ) -> AppResult<Response> {
        let request: JsonRpcRequest = serde_json::from_slice(&body)
            .map_err(|e| AppError::invalid_input(format!("Malformed JSON-RPC request: {e}")))?;

        let session_header = headers
            .get(SESSION_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        if let Some(session_id) = session_header {
            let Some(session) = resources.registry.lookup(&session_id) else {
                return Err(AppError::invalid_session(format!(
                    "unknown session {session_id}"
                )));
            };
            session.touch();
            return Ok(Self::dispatch(&resources, &session, request, ctx)
                .await
                .into_response());
        }

        if request.method != "initialize" {
            return Err(AppError::invalid_session(
                "missing mcp-session-id header on non-initialize request",
            ));
        }

        // Header-less initialize is the one place sessions are born
        let session = Session::new(&ctx.user_id);
        resources.registry.create(session.clone())?;
        session.activate()?;
        let session_id = session.session_id().to_owned();

        let response = Self::dispatch(&resources, &session, request, ctx).await;

        let mut http_response = response.into_response();
        match HeaderValue::from_str(&session_id) {
            Ok(value) => {
                http_response.headers_mut().insert(SESSION_HEADER, value);
            }
            Err(e) => {
                error!("Session ID not representable as a header value: {e}");
                resources.registry.remove(&session_id);
                return Err(AppError::internal("Failed to issue session header"));
            }
        }
        Ok(http_response)
    }

    /// Run dispatch in a spawned task so panics surface as `-32603` instead
    /// of an aborted connection. Per-session ordering comes from the
    /// session's dispatch lock.
    async fn dispatch(
        resources: &Arc<ServerResources>,
        session: &Arc<Session>,
        request: JsonRpcRequest,
        ctx: CredentialContext,
    ) -> Response {
        let request_id = request.id.clone();
        let executor = resources.executor.clone();
        let session = session.clone();

        let handle = tokio::spawn(async move {
            let _ordering = session.lock_dispatch().await;
            ProtocolHandler::handle(request, executor.as_ref(), &ctx).await
        });

        match handle.await {
            Ok(response) => Json(response).into_response(),
            Err(e) => {
                error!("Request handler crashed: {e}");
                let body = JsonRpcResponse::error(
                    request_id,
                    JsonRpcError::internal("Request handler crashed"),
                );
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }

    /// Long-lived SSE stream for server-initiated messages
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> AppResult<Response> {
        let session_id = Self::require_session_header(&headers)?;
        let Some(session) = resources.registry.lookup(&session_id) else {
            return Err(AppError::invalid_session(format!(
                "unknown session {session_id}"
            )));
        };

        let Some(mut outbound) = session.take_outbound() else {
            return Err(AppError::invalid_input(format!(
                "Session {session_id} already has an open stream"
            )));
        };

        info!(session_id = %session_id, "SSE stream opened");
        let registry = resources.registry.clone();
        let stream = async_stream::stream! {
            // Dropping the guard (client disconnect or session close) is the
            // transport's close signal; removal itself is idempotent.
            let _guard = DisconnectGuard {
                registry,
                session_id: session.session_id().to_owned(),
            };
            loop {
                tokio::select! {
                    () = session.wait_closed() => break,
                    message = outbound.recv() => match message {
                        Some(value) => {
                            yield Ok::<Event, Infallible>(
                                Event::default().event("message").data(value.to_string()),
                            );
                        }
                        None => break,
                    },
                }
            }
        };

        Ok(Sse::new(stream)
            .keep_alive(KeepAlive::default())
            .into_response())
    }

    /// Explicit session termination
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> AppResult<Response> {
        let session_id = Self::require_session_header(&headers)?;
        if resources.registry.lookup(&session_id).is_none() {
            return Err(AppError::invalid_session(format!(
                "session not found: {session_id}"
            )));
        }
        resources.registry.remove(&session_id);
        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// Static capability and usage payload, no authentication required
    async fn handle_info() -> Json<Value> {
        let tools: Vec<Value> = catalog()
            .into_iter()
            .map(|def| json!({ "name": def.name, "description": def.description }))
            .collect();
        Json(json!({
            "name": META_ADS_MCP_SERVER,
            "version": SERVER_VERSION,
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "transport": {
                "type": "streamable-http",
                "endpoint": "/mcp",
                "sessionHeader": SESSION_HEADER,
            },
            "authentication": {
                "tokenQueryParameter": "token",
                "bearerHeader": true,
            },
            "tools": tools,
        }))
    }

    fn require_session_header(headers: &HeaderMap) -> AppResult<String> {
        headers
            .get(SESSION_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
            .ok_or_else(|| {
                warn!("Request missing the {SESSION_HEADER} header");
                AppError::invalid_session("missing mcp-session-id header")
            })
    }
}

/// Removes the session from the registry when the SSE stream is dropped
struct DisconnectGuard {
    registry: Arc<SessionRegistry>,
    session_id: String,
}

impl Drop for DisconnectGuard {
    fn drop(&mut self) {
        info!(session_id = %self.session_id, "SSE stream closed");
        self.registry.remove(&self.session_id);
    }
}
