// ABOUTME: Credential resolution for inbound requests carrying a Meta Ads access token
// ABOUTME: Defines the CredentialContext and the resolver trait the transport depends on
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication and credential resolution
//!
//! Every inbound `/mcp` request carries a Meta Ads access token (the `token`
//! query parameter, or an `Authorization: Bearer` header). The resolver
//! validates it against the Graph API and produces a [`CredentialContext`]
//! that is passed by value into tool execution and never persisted.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::errors::{AppError, AppResult};
use crate::external::GraphApiClient;

/// Resolved identity and authorization data for one request
#[derive(Debug, Clone)]
pub struct CredentialContext {
    /// The validated Meta Ads access token
    pub access_token: String,
    /// Graph user ID the token belongs to
    pub user_id: String,
    /// Ad account IDs visible to this token (`act_`-prefixed)
    pub ad_account_ids: Vec<String>,
}

/// Resolves a bearer token into a validated [`CredentialContext`]
///
/// The single external identity interface the MCP core depends on. Tests
/// substitute a stub; production uses [`GraphCredentialResolver`].
#[async_trait]
pub trait CredentialResolver: Send + Sync {
    /// Validate `token` and return the credential context it represents.
    ///
    /// # Errors
    /// Returns `AppError::Unauthorized` when the token is invalid or expired.
    async fn resolve(&self, token: &str) -> AppResult<CredentialContext>;
}

#[derive(Debug, Deserialize)]
struct GraphUser {
    id: String,
}

#[derive(Debug, Deserialize)]
struct AdAccountList {
    #[serde(default)]
    data: Vec<AdAccountRef>,
}

#[derive(Debug, Deserialize)]
struct AdAccountRef {
    id: String,
}

/// Production resolver backed by the Graph API (`/me` and `/me/adaccounts`)
pub struct GraphCredentialResolver {
    client: Arc<GraphApiClient>,
}

impl GraphCredentialResolver {
    /// Create a resolver sharing the server's Graph API client
    #[must_use]
    pub fn new(client: Arc<GraphApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CredentialResolver for GraphCredentialResolver {
    async fn resolve(&self, token: &str) -> AppResult<CredentialContext> {
        if token.is_empty() {
            return Err(AppError::unauthorized("Missing access token"));
        }

        let me = self
            .client
            .get(token, "me", &[("fields", "id".to_owned())])
            .await
            .map_err(|e| AppError::unauthorized(format!("Token validation failed: {e}")))?;

        let user: GraphUser = serde_json::from_value(me.body)
            .map_err(|e| AppError::unauthorized(format!("Unexpected /me response: {e}")))?;

        let accounts = self
            .client
            .get(
                token,
                "me/adaccounts",
                &[("fields", "id".to_owned()), ("limit", "100".to_owned())],
            )
            .await
            .map_err(|e| AppError::unauthorized(format!("Ad account lookup failed: {e}")))?;

        let account_list: AdAccountList =
            serde_json::from_value(accounts.body).unwrap_or(AdAccountList { data: Vec::new() });
        let ad_account_ids: Vec<String> =
            account_list.data.into_iter().map(|a| a.id).collect();

        debug!(
            user_id = %user.id,
            accounts = ad_account_ids.len(),
            "Resolved credential context"
        );

        Ok(CredentialContext {
            access_token: token.to_owned(),
            user_id: user.id,
            ad_account_ids,
        })
    }
}
