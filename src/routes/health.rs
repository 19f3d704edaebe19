// ABOUTME: Liveness endpoint reporting server identity and session count
// ABOUTME: Unauthenticated so load balancers can probe it
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Health check route

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde_json::{json, Value};

use crate::constants::{
    protocol::MCP_PROTOCOL_VERSION, service_names::META_ADS_MCP_SERVER, SERVER_VERSION,
};
use crate::mcp::resources::ServerResources;

/// Health check routes
pub struct HealthRoutes;

impl HealthRoutes {
    /// Build the health router
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::health))
            .with_state(resources)
    }

    async fn health(State(resources): State<Arc<ServerResources>>) -> Json<Value> {
        Json(json!({
            "status": "healthy",
            "timestamp": Utc::now().to_rfc3339(),
            "server": META_ADS_MCP_SERVER,
            "version": SERVER_VERSION,
            "protocol": MCP_PROTOCOL_VERSION,
            "activeSessions": resources.registry.active_count(),
        }))
    }
}
