// ABOUTME: Library root for the Meta Ads MCP server
// ABOUTME: Exposes the protocol core, transport layer, tool adapter, and supporting modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Meta Ads MCP server
//!
//! A session-managed Model Context Protocol server exposing Meta Ads
//! marketing data (ad accounts, campaigns, ad sets, ads, insights) as MCP
//! tools over a streamable HTTP transport. JSON-RPC requests arrive on
//! `POST /mcp`, server-initiated messages flow over an SSE stream on
//! `GET /mcp`, and `DELETE /mcp` tears a session down.
//!
//! Layering, outside in:
//! - [`server`] binds the listener and assembles the middleware stack
//! - [`routes`] implements the HTTP surface and session binding rules
//! - [`mcp`] holds the protocol dispatcher, session registry, and wire schema
//! - [`tools`] adapts the nine ad-data tools onto the Graph API
//! - [`external`] is the cached Graph API HTTP client

/// Credential resolution for inbound requests
pub mod auth;

/// Environment-driven configuration
pub mod config;

/// Protocol identifiers and shared constants
pub mod constants;

/// Unified error handling
pub mod errors;

/// Outbound Graph API client
pub mod external;

/// JSON-RPC request/response types
pub mod jsonrpc;

/// Tracing subscriber setup
pub mod logging;

/// MCP protocol core: dispatch, sessions, schema, resources
pub mod mcp;

/// Request authentication middleware
pub mod middleware;

/// HTTP route handlers
pub mod routes;

/// HTTP server assembly and lifecycle
pub mod server;

/// Tool catalog and the Graph-backed tool adapter
pub mod tools;
