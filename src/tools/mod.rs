// ABOUTME: Tool registry and execution contract for the MCP tool surface
// ABOUTME: The ToolId enum is the single source of truth for catalog/dispatch parity
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool execution engine
//!
//! Every tool the server exposes is a variant of [`ToolId`]; both
//! `tools/list` and `tools/call` derive from it, so a tool cannot be listed
//! without being dispatchable or vice versa. The protocol handler depends
//! only on the narrow [`ToolExecutor`] trait, which tests replace with a
//! stub returning canned results.

pub mod adapter;
pub mod catalog;

use async_trait::async_trait;
use serde_json::Value;

use crate::auth::CredentialContext;
use crate::errors::ToolError;

pub use adapter::GraphToolAdapter;
pub use catalog::{catalog, ToolDef};

/// Identifier for every tool this server exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolId {
    /// List ad accounts visible to the token
    ListAdAccounts,
    /// List campaigns in an ad account
    ListCampaigns,
    /// Performance insights for one campaign
    GetCampaignInsights,
    /// Aggregated insights for an ad account
    GetAccountInsights,
    /// Search campaigns by name
    SearchCampaigns,
    /// List ad sets in a campaign
    ListAdsets,
    /// Performance insights for one ad set
    GetAdsetInsights,
    /// List ads in an ad set
    ListAds,
    /// Performance insights for one ad
    GetAdInsights,
}

impl ToolId {
    /// All tools, in catalog order
    pub const ALL: [Self; 9] = [
        Self::ListAdAccounts,
        Self::ListCampaigns,
        Self::GetCampaignInsights,
        Self::GetAccountInsights,
        Self::SearchCampaigns,
        Self::ListAdsets,
        Self::GetAdsetInsights,
        Self::ListAds,
        Self::GetAdInsights,
    ];

    /// Wire name of this tool
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ListAdAccounts => "list_ad_accounts",
            Self::ListCampaigns => "list_campaigns",
            Self::GetCampaignInsights => "get_campaign_insights",
            Self::GetAccountInsights => "get_account_insights",
            Self::SearchCampaigns => "search_campaigns",
            Self::ListAdsets => "list_adsets",
            Self::GetAdsetInsights => "get_adset_insights",
            Self::ListAds => "list_ads",
            Self::GetAdInsights => "get_ad_insights",
        }
    }

    /// Resolve a wire name back to a tool, `None` for unknown names
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }
}

/// Result of one tool execution
#[derive(Debug, Clone)]
pub struct ToolOutcome {
    /// Normalized JSON-serializable result
    pub value: Value,
    /// Whether the backing API response was served from cache
    /// (informational, surfaced in logs only)
    pub cached: Option<bool>,
}

/// Narrow execution capability the protocol handler depends on
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Execute `tool` with `args` on behalf of `ctx`.
    ///
    /// # Errors
    /// Returns a [`ToolError`] for argument validation failures and any
    /// underlying API failure; the caller converts it to `isError` content.
    async fn execute(
        &self,
        tool: ToolId,
        args: &Value,
        ctx: &CredentialContext,
    ) -> Result<ToolOutcome, ToolError>;
}
