// ABOUTME: Configuration module organization for the Meta Ads MCP server
// ABOUTME: Re-exports the environment-driven ServerConfig
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration management
//!
//! Configuration is environment-only: every knob is an environment variable
//! with a sensible default, read once at startup into [`ServerConfig`].

pub mod environment;

pub use environment::{GraphApiConfig, ServerConfig};
