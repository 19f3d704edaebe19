// ABOUTME: HTTP route module organization for the MCP server
// ABOUTME: Groups the transport endpoints and the health check
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP route handlers

/// Health check endpoint
pub mod health;

/// MCP transport endpoints (`/mcp`, `/mcp/info`)
pub mod mcp;

pub use health::HealthRoutes;
pub use mcp::McpRoutes;
