// ABOUTME: HTTP server assembly, middleware stack, and graceful shutdown
// ABOUTME: Binds the listener, runs the idle-session reaper, and drains sessions on exit
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP server
//!
//! Assembles the route tree with tracing, request-ID, and CORS layers, then
//! serves it until `SIGTERM`/`SIGINT`. Shutdown closes every registered
//! session before the process exits so clients observe a clean stream
//! termination rather than a dropped connection.

use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, Json, Router};
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{debug, info, warn};

use crate::constants::protocol::SESSION_HEADER;
use crate::errors::{AppError, AppResult};
use crate::mcp::resources::ServerResources;
use crate::mcp::session::SessionRegistry;
use crate::routes::{HealthRoutes, McpRoutes};

/// The MCP HTTP server
pub struct McpHttpServer {
    resources: Arc<ServerResources>,
}

impl McpHttpServer {
    /// Create a server over shared resources
    #[must_use]
    pub fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Assemble the full route tree with the middleware stack applied
    #[must_use]
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
            .expose_headers([axum::http::header::HeaderName::from_static(SESSION_HEADER)]);

        Router::new()
            .merge(McpRoutes::routes(self.resources.clone()))
            .merge(HealthRoutes::routes(self.resources.clone()))
            .fallback(Self::not_found)
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(cors)
    }

    /// Bind and serve until a shutdown signal arrives.
    ///
    /// # Errors
    /// Returns an error if the listener cannot bind or the server fails.
    pub async fn serve(self) -> AppResult<()> {
        let config = self.resources.config.clone();
        let addr = format!("{}:{}", config.host, config.http_port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| AppError::config(format!("Failed to bind {addr}: {e}")))?;
        info!("MCP server listening on {addr}");

        if config.session_ttl_secs > 0 {
            Self::spawn_idle_reaper(self.resources.registry.clone(), config.session_ttl_secs);
        }

        let registry = self.resources.registry.clone();
        axum::serve(listener, self.router())
            .with_graceful_shutdown(Self::shutdown_signal(registry))
            .await
            .map_err(|e| AppError::internal(format!("HTTP server failed: {e}")))?;

        info!("Server stopped");
        Ok(())
    }

    async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Not found" })),
        )
    }

    /// Periodically drops sessions idle longer than the configured TTL
    fn spawn_idle_reaper(registry: Arc<SessionRegistry>, ttl_secs: u64) {
        info!("Idle-session reaper enabled (ttl {ttl_secs}s)");
        let interval = Duration::from_secs((ttl_secs / 2).max(1));
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                let reaped = registry.reap_idle(ttl_secs);
                if reaped > 0 {
                    info!("Reaped {reaped} idle sessions");
                } else {
                    debug!("Idle reaper pass found no expired sessions");
                }
            }
        });
    }

    /// Resolves on `SIGTERM`/`SIGINT`, then closes every live session
    async fn shutdown_signal(registry: Arc<SessionRegistry>) {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to install SIGINT handler: {e}");
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut signal) => {
                    signal.recv().await;
                }
                Err(e) => {
                    warn!("Failed to install SIGTERM handler: {e}");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            () = ctrl_c => info!("Received SIGINT, shutting down"),
            () = terminate => info!("Received SIGTERM, shutting down"),
        }

        let open = registry.active_count();
        if open > 0 {
            info!("Closing {open} active sessions");
        }
        registry.close_all();
    }
}
