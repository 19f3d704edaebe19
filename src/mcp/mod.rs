// ABOUTME: Model Context Protocol server core module organization
// ABOUTME: Groups protocol dispatch, session lifecycle, wire schema, and shared resources
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model Context Protocol server implementation

/// Pure JSON-RPC method dispatch
pub mod protocol;

/// Dependency injection container for route handlers
pub mod resources;

/// MCP wire schema types
pub mod schema;

/// Session lifecycle and registry
pub mod session;
