// ABOUTME: External API client module organization
// ABOUTME: Hosts the Meta Graph API client used by the tool adapter and credential resolver
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! External API clients

pub mod graph_client;

pub use graph_client::{GraphApiClient, GraphResponse};
