// ABOUTME: Shared resource container injected into every route handler
// ABOUTME: Wires the config, session registry, credential resolver, and tool executor together
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Centralized resource management
//!
//! All shared server state lives in one [`ServerResources`] container that is
//! cloned (as an `Arc`) into each route handler. Tests construct it with stub
//! implementations of the resolver and executor traits.

use std::sync::Arc;

use crate::auth::{CredentialResolver, GraphCredentialResolver};
use crate::config::ServerConfig;
use crate::errors::AppResult;
use crate::external::GraphApiClient;
use crate::mcp::session::SessionRegistry;
use crate::tools::{GraphToolAdapter, ToolExecutor};

/// Container for all shared server resources
pub struct ServerResources {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Process-wide session registry
    pub registry: Arc<SessionRegistry>,
    /// Token-to-credential resolver
    pub resolver: Arc<dyn CredentialResolver>,
    /// Tool execution backend
    pub executor: Arc<dyn ToolExecutor>,
}

impl ServerResources {
    /// Assemble resources from explicit components
    #[must_use]
    pub fn new(
        config: ServerConfig,
        registry: Arc<SessionRegistry>,
        resolver: Arc<dyn CredentialResolver>,
        executor: Arc<dyn ToolExecutor>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            registry,
            resolver,
            executor,
        }
    }

    /// Build the production wiring: one shared Graph API client backing both
    /// the credential resolver and the tool adapter.
    ///
    /// # Errors
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn from_config(config: ServerConfig) -> AppResult<Self> {
        let graph_client = Arc::new(GraphApiClient::new(&config.graph_api)?);
        let resolver = Arc::new(GraphCredentialResolver::new(graph_client.clone()));
        let executor = Arc::new(GraphToolAdapter::new(graph_client));
        Ok(Self::new(
            config,
            Arc::new(SessionRegistry::new()),
            resolver,
            executor,
        ))
    }
}
