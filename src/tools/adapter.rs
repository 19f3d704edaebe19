// ABOUTME: Tool adapter mapping tool invocations onto Meta Graph API calls
// ABOUTME: Validates arguments before dispatch and normalizes results into JSON envelopes
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Graph API tool adapter
//!
//! Translates `(tool, arguments, credentials)` into concrete Graph API GET
//! requests. Required arguments and enum constraints are validated here,
//! before any network traffic, so schema violations surface as descriptive
//! tool errors rather than upstream rejections.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::auth::CredentialContext;
use crate::errors::ToolError;
use crate::external::{GraphApiClient, GraphResponse};

use super::{ToolExecutor, ToolId, ToolOutcome};

const DEFAULT_LIMIT: u32 = 25;
const MAX_LIMIT: u32 = 100;
const DEFAULT_DATE_PRESET: &str = "last_7d";

const ACCOUNT_FIELDS: &str = "id,name,account_status,currency,timezone_name";
const CAMPAIGN_FIELDS: &str =
    "id,name,status,objective,daily_budget,lifetime_budget,created_time,updated_time";
const ADSET_FIELDS: &str =
    "id,name,status,optimization_goal,billing_event,daily_budget,created_time";
const AD_FIELDS: &str = "id,name,status,creative,created_time";
const INSIGHTS_FIELDS: &str = "impressions,clicks,spend,reach,cpc,cpm,ctr,frequency";

/// Entity status filter accepted by the list tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityStatus {
    /// Currently delivering
    Active,
    /// Paused by the advertiser
    Paused,
    /// Archived (read-only)
    Archived,
    /// No status filter
    All,
}

impl EntityStatus {
    /// Graph `effective_status` filter value, `None` for [`Self::All`]
    #[must_use]
    pub fn as_filter(self) -> Option<String> {
        match self {
            Self::Active => Some("[\"ACTIVE\"]".to_owned()),
            Self::Paused => Some("[\"PAUSED\"]".to_owned()),
            Self::Archived => Some("[\"ARCHIVED\"]".to_owned()),
            Self::All => None,
        }
    }
}

/// Explicit reporting window with inclusive bounds
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TimeRange {
    /// Start date, `YYYY-MM-DD`
    pub since: String,
    /// End date, `YYYY-MM-DD`
    pub until: String,
}

#[derive(Debug, Deserialize)]
struct ListAdAccountsParams {
    fields: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListCampaignsParams {
    ad_account_id: Option<String>,
    status: Option<EntityStatus>,
    limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct CampaignInsightsParams {
    campaign_id: String,
    date_preset: Option<String>,
    time_range: Option<TimeRange>,
}

#[derive(Debug, Deserialize)]
struct AccountInsightsParams {
    ad_account_id: Option<String>,
    date_preset: Option<String>,
    level: Option<String>,
    breakdowns: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchCampaignsParams {
    query: String,
    ad_account_id: Option<String>,
    limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ListAdsetsParams {
    campaign_id: String,
    status: Option<EntityStatus>,
    limit: Option<u32>,
    fields: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AdsetInsightsParams {
    adset_id: String,
    date_preset: Option<String>,
    time_range: Option<TimeRange>,
    fields: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListAdsParams {
    adset_id: String,
    status: Option<EntityStatus>,
    limit: Option<u32>,
    fields: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AdInsightsParams {
    ad_id: String,
    date_preset: Option<String>,
    time_range: Option<TimeRange>,
    fields: Option<String>,
}

/// Ensure an ad account ID carries the `act_` prefix the Graph API expects
#[must_use]
pub fn normalize_account_id(id: &str) -> String {
    if id.starts_with("act_") {
        id.to_owned()
    } else {
        format!("act_{id}")
    }
}

/// Resolve the reporting window into Graph query parameters.
///
/// `date_preset` wins when both are given (logged as a warning); when
/// neither is given the default preset `last_7d` applies.
#[must_use]
pub fn resolve_reporting_window(
    date_preset: Option<String>,
    time_range: Option<&TimeRange>,
) -> (&'static str, String) {
    match (date_preset, time_range) {
        (Some(preset), maybe_range) => {
            if maybe_range.is_some() {
                warn!("Both date_preset and time_range given; favoring date_preset");
            }
            ("date_preset", preset)
        }
        (None, Some(range)) => (
            "time_range",
            json!({ "since": range.since, "until": range.until }).to_string(),
        ),
        (None, None) => ("date_preset", DEFAULT_DATE_PRESET.to_owned()),
    }
}

fn parse_params<T: serde::de::DeserializeOwned>(args: &Value) -> Result<T, ToolError> {
    serde_json::from_value(args.clone())
        .map_err(|e| ToolError::invalid_arguments(format!("Invalid arguments: {e}")))
}

fn clamp_limit(limit: Option<u32>) -> String {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT).to_string()
}

/// Tool adapter backed by the Meta Graph API
pub struct GraphToolAdapter {
    client: Arc<GraphApiClient>,
}

impl GraphToolAdapter {
    /// Create an adapter sharing the server's Graph API client
    #[must_use]
    pub fn new(client: Arc<GraphApiClient>) -> Self {
        Self { client }
    }

    /// Pick the explicit account or fall back to the first credential account
    fn resolve_account(
        explicit: Option<String>,
        ctx: &CredentialContext,
    ) -> Result<String, ToolError> {
        let raw = match explicit {
            Some(id) if !id.is_empty() => id,
            _ => ctx
                .ad_account_ids
                .first()
                .cloned()
                .ok_or_else(|| {
                    ToolError::invalid_arguments(
                        "No ad_account_id given and the token has no visible ad accounts",
                    )
                })?,
        };
        Ok(normalize_account_id(&raw))
    }

    async fn list_ad_accounts(
        &self,
        args: &Value,
        ctx: &CredentialContext,
    ) -> Result<GraphResponse, ToolError> {
        let params: ListAdAccountsParams = parse_params(args)?;
        let fields = params.fields.unwrap_or_else(|| ACCOUNT_FIELDS.to_owned());
        self.client
            .get(
                &ctx.access_token,
                "me/adaccounts",
                &[("fields", fields), ("limit", MAX_LIMIT.to_string())],
            )
            .await
    }

    async fn list_campaigns(
        &self,
        args: &Value,
        ctx: &CredentialContext,
    ) -> Result<GraphResponse, ToolError> {
        let params: ListCampaignsParams = parse_params(args)?;
        let account = Self::resolve_account(params.ad_account_id, ctx)?;
        let mut query = vec![
            ("fields", CAMPAIGN_FIELDS.to_owned()),
            ("limit", clamp_limit(params.limit)),
        ];
        if let Some(filter) = params.status.unwrap_or(EntityStatus::Active).as_filter() {
            query.push(("effective_status", filter));
        }
        self.client
            .get(&ctx.access_token, &format!("{account}/campaigns"), &query)
            .await
    }

    async fn campaign_insights(
        &self,
        args: &Value,
        ctx: &CredentialContext,
    ) -> Result<GraphResponse, ToolError> {
        let params: CampaignInsightsParams = parse_params(args)?;
        let window = resolve_reporting_window(params.date_preset, params.time_range.as_ref());
        self.client
            .get(
                &ctx.access_token,
                &format!("{}/insights", params.campaign_id),
                &[("fields", INSIGHTS_FIELDS.to_owned()), (window.0, window.1)],
            )
            .await
    }

    async fn account_insights(
        &self,
        args: &Value,
        ctx: &CredentialContext,
    ) -> Result<GraphResponse, ToolError> {
        let params: AccountInsightsParams = parse_params(args)?;
        let account = Self::resolve_account(params.ad_account_id, ctx)?;
        let window = resolve_reporting_window(params.date_preset, None);
        let mut query = vec![
            ("fields", INSIGHTS_FIELDS.to_owned()),
            (window.0, window.1),
            ("level", params.level.unwrap_or_else(|| "account".to_owned())),
        ];
        if let Some(breakdowns) = params.breakdowns {
            query.push(("breakdowns", breakdowns));
        }
        self.client
            .get(&ctx.access_token, &format!("{account}/insights"), &query)
            .await
    }

    /// Campaign search fetches a page of campaigns and filters by name
    /// locally; the Graph API has no substring search on this edge.
    async fn search_campaigns(
        &self,
        args: &Value,
        ctx: &CredentialContext,
    ) -> Result<GraphResponse, ToolError> {
        let params: SearchCampaignsParams = parse_params(args)?;
        if params.query.trim().is_empty() {
            return Err(ToolError::invalid_arguments("query must not be empty"));
        }
        let account = Self::resolve_account(params.ad_account_id, ctx)?;
        let limit = params
            .limit
            .unwrap_or(DEFAULT_LIMIT)
            .clamp(1, MAX_LIMIT) as usize;

        let response = self
            .client
            .get(
                &ctx.access_token,
                &format!("{account}/campaigns"),
                &[
                    ("fields", CAMPAIGN_FIELDS.to_owned()),
                    ("limit", MAX_LIMIT.to_string()),
                ],
            )
            .await?;

        let needle = params.query.to_lowercase();
        let matches: Vec<Value> = response
            .body
            .get("data")
            .and_then(Value::as_array)
            .map(|campaigns| {
                campaigns
                    .iter()
                    .filter(|c| {
                        c.get("name")
                            .and_then(Value::as_str)
                            .is_some_and(|name| name.to_lowercase().contains(&needle))
                    })
                    .take(limit)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        Ok(GraphResponse {
            body: json!({
                "query": params.query,
                "matched": matches.len(),
                "data": matches,
            }),
            cached: response.cached,
        })
    }

    async fn list_adsets(
        &self,
        args: &Value,
        ctx: &CredentialContext,
    ) -> Result<GraphResponse, ToolError> {
        let params: ListAdsetsParams = parse_params(args)?;
        let mut query = vec![
            (
                "fields",
                params.fields.unwrap_or_else(|| ADSET_FIELDS.to_owned()),
            ),
            ("limit", clamp_limit(params.limit)),
        ];
        if let Some(filter) = params.status.unwrap_or(EntityStatus::Active).as_filter() {
            query.push(("effective_status", filter));
        }
        self.client
            .get(
                &ctx.access_token,
                &format!("{}/adsets", params.campaign_id),
                &query,
            )
            .await
    }

    async fn adset_insights(
        &self,
        args: &Value,
        ctx: &CredentialContext,
    ) -> Result<GraphResponse, ToolError> {
        let params: AdsetInsightsParams = parse_params(args)?;
        let window = resolve_reporting_window(params.date_preset, params.time_range.as_ref());
        self.client
            .get(
                &ctx.access_token,
                &format!("{}/insights", params.adset_id),
                &[
                    (
                        "fields",
                        params.fields.unwrap_or_else(|| INSIGHTS_FIELDS.to_owned()),
                    ),
                    (window.0, window.1),
                ],
            )
            .await
    }

    async fn list_ads(
        &self,
        args: &Value,
        ctx: &CredentialContext,
    ) -> Result<GraphResponse, ToolError> {
        let params: ListAdsParams = parse_params(args)?;
        let mut query = vec![
            (
                "fields",
                params.fields.unwrap_or_else(|| AD_FIELDS.to_owned()),
            ),
            ("limit", clamp_limit(params.limit)),
        ];
        if let Some(filter) = params.status.unwrap_or(EntityStatus::Active).as_filter() {
            query.push(("effective_status", filter));
        }
        self.client
            .get(
                &ctx.access_token,
                &format!("{}/ads", params.adset_id),
                &query,
            )
            .await
    }

    async fn ad_insights(
        &self,
        args: &Value,
        ctx: &CredentialContext,
    ) -> Result<GraphResponse, ToolError> {
        let params: AdInsightsParams = parse_params(args)?;
        let window = resolve_reporting_window(params.date_preset, params.time_range.as_ref());
        self.client
            .get(
                &ctx.access_token,
                &format!("{}/insights", params.ad_id),
                &[
                    (
                        "fields",
                        params.fields.unwrap_or_else(|| INSIGHTS_FIELDS.to_owned()),
                    ),
                    (window.0, window.1),
                ],
            )
            .await
    }
}

#[async_trait]
impl ToolExecutor for GraphToolAdapter {
    async fn execute(
        &self,
        tool: ToolId,
        args: &Value,
        ctx: &CredentialContext,
    ) -> Result<ToolOutcome, ToolError> {
        debug!(tool = tool.name(), user_id = %ctx.user_id, "Executing tool");

        let response = match tool {
            ToolId::ListAdAccounts => self.list_ad_accounts(args, ctx).await?,
            ToolId::ListCampaigns => self.list_campaigns(args, ctx).await?,
            ToolId::GetCampaignInsights => self.campaign_insights(args, ctx).await?,
            ToolId::GetAccountInsights => self.account_insights(args, ctx).await?,
            ToolId::SearchCampaigns => self.search_campaigns(args, ctx).await?,
            ToolId::ListAdsets => self.list_adsets(args, ctx).await?,
            ToolId::GetAdsetInsights => self.adset_insights(args, ctx).await?,
            ToolId::ListAds => self.list_ads(args, ctx).await?,
            ToolId::GetAdInsights => self.ad_insights(args, ctx).await?,
        };

        Ok(ToolOutcome {
            value: response.body,
            cached: Some(response.cached),
        })
    }
}
