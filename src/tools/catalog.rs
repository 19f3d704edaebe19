// ABOUTME: Static tool catalog with JSON Schema argument descriptions
// ABOUTME: Served by tools/list; schemas mirror the adapter's validation rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static tool catalog
//!
//! Defined once at startup and immutable for a session's life. Schema shapes
//! follow JSON Schema draft-07 conventions: `type: object`, `properties`,
//! `required`, and `enum` constraints where arguments are closed sets.

use serde::Serialize;
use serde_json::{json, Value};

use super::ToolId;

/// One entry in the `tools/list` catalog
#[derive(Debug, Clone, Serialize)]
pub struct ToolDef {
    /// Unique tool name
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// JSON Schema for accepted arguments
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

const STATUS_ENUM: [&str; 4] = ["ACTIVE", "PAUSED", "ARCHIVED", "ALL"];

const DATE_PRESET_ENUM: [&str; 8] = [
    "today",
    "yesterday",
    "last_7d",
    "last_14d",
    "last_30d",
    "last_90d",
    "this_month",
    "last_month",
];

fn status_property() -> Value {
    json!({
        "type": "string",
        "enum": STATUS_ENUM,
        "description": "Filter by effective status; defaults to ACTIVE"
    })
}

fn limit_property() -> Value {
    json!({
        "type": "integer",
        "minimum": 1,
        "maximum": 100,
        "description": "Maximum number of results; defaults to 25"
    })
}

fn fields_property(example: &str) -> Value {
    json!({
        "type": "string",
        "description": format!("Comma-separated field list, e.g. {example}")
    })
}

fn account_property() -> Value {
    json!({
        "type": "string",
        "description": "Ad account ID (act_ prefix optional); defaults to the first account on the token"
    })
}

fn date_preset_property() -> Value {
    json!({
        "type": "string",
        "enum": DATE_PRESET_ENUM,
        "description": "Relative reporting window; defaults to last_7d and wins over time_range"
    })
}

fn time_range_property() -> Value {
    json!({
        "type": "object",
        "properties": {
            "since": { "type": "string", "description": "Start date, YYYY-MM-DD" },
            "until": { "type": "string", "description": "End date, YYYY-MM-DD" }
        },
        "required": ["since", "until"],
        "description": "Explicit reporting window; ignored when date_preset is given"
    })
}

fn schema(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

/// Build the full static tool catalog, in [`ToolId::ALL`] order
#[must_use]
pub fn catalog() -> Vec<ToolDef> {
    ToolId::ALL.into_iter().map(definition).collect()
}

/// Catalog entry for one tool
#[must_use]
pub fn definition(tool: ToolId) -> ToolDef {
    match tool {
        ToolId::ListAdAccounts => ToolDef {
            name: tool.name(),
            description: "List the ad accounts visible to the authenticated token, with account status, currency, and timezone.",
            input_schema: schema(
                json!({ "fields": fields_property("id,name,account_status,currency") }),
                &[],
            ),
        },
        ToolId::ListCampaigns => ToolDef {
            name: tool.name(),
            description: "List campaigns in an ad account, filtered by status (default ACTIVE). Includes objective and budget fields.",
            input_schema: schema(
                json!({
                    "ad_account_id": account_property(),
                    "status": status_property(),
                    "limit": limit_property(),
                }),
                &[],
            ),
        },
        ToolId::GetCampaignInsights => ToolDef {
            name: tool.name(),
            description: "Performance insights (impressions, clicks, spend, reach, CPC, CPM, CTR) for a single campaign over a reporting window.",
            input_schema: schema(
                json!({
                    "campaign_id": { "type": "string", "description": "Campaign ID" },
                    "date_preset": date_preset_property(),
                    "time_range": time_range_property(),
                }),
                &["campaign_id"],
            ),
        },
        ToolId::GetAccountInsights => ToolDef {
            name: tool.name(),
            description: "Aggregated insights for an ad account, optionally broken down by level (account, campaign, adset, ad) and breakdown dimensions.",
            input_schema: schema(
                json!({
                    "ad_account_id": account_property(),
                    "date_preset": date_preset_property(),
                    "level": {
                        "type": "string",
                        "enum": ["account", "campaign", "adset", "ad"],
                        "description": "Aggregation level; defaults to account"
                    },
                    "breakdowns": {
                        "type": "string",
                        "description": "Comma-separated breakdown dimensions, e.g. age,gender"
                    },
                }),
                &[],
            ),
        },
        ToolId::SearchCampaigns => ToolDef {
            name: tool.name(),
            description: "Search campaigns by name (case-insensitive substring match) within an ad account.",
            input_schema: schema(
                json!({
                    "query": { "type": "string", "description": "Substring to match against campaign names" },
                    "ad_account_id": account_property(),
                    "limit": limit_property(),
                }),
                &["query"],
            ),
        },
        ToolId::ListAdsets => ToolDef {
            name: tool.name(),
            description: "List ad sets belonging to a campaign, with optimization goal and budget fields.",
            input_schema: schema(
                json!({
                    "campaign_id": { "type": "string", "description": "Parent campaign ID" },
                    "status": status_property(),
                    "limit": limit_property(),
                    "fields": fields_property("id,name,status,optimization_goal"),
                }),
                &["campaign_id"],
            ),
        },
        ToolId::GetAdsetInsights => ToolDef {
            name: tool.name(),
            description: "Performance insights for a single ad set over a reporting window.",
            input_schema: schema(
                json!({
                    "adset_id": { "type": "string", "description": "Ad set ID" },
                    "date_preset": date_preset_property(),
                    "time_range": time_range_property(),
                    "fields": fields_property("impressions,clicks,spend"),
                }),
                &["adset_id"],
            ),
        },
        ToolId::ListAds => ToolDef {
            name: tool.name(),
            description: "List ads belonging to an ad set, including creative references.",
            input_schema: schema(
                json!({
                    "adset_id": { "type": "string", "description": "Parent ad set ID" },
                    "status": status_property(),
                    "limit": limit_property(),
                    "fields": fields_property("id,name,status,creative"),
                }),
                &["adset_id"],
            ),
        },
        ToolId::GetAdInsights => ToolDef {
            name: tool.name(),
            description: "Performance insights for a single ad over a reporting window.",
            input_schema: schema(
                json!({
                    "ad_id": { "type": "string", "description": "Ad ID" },
                    "date_preset": date_preset_property(),
                    "time_range": time_range_property(),
                    "fields": fields_property("impressions,clicks,spend,ctr"),
                }),
                &["ad_id"],
            ),
        },
    }
}
