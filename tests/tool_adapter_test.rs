// ABOUTME: Tests for tool adapter argument handling and Graph query shaping
// ABOUTME: Exercises validation failures and the pure helper functions without network access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::uninlined_format_args
)]

mod common;

use std::sync::Arc;

use anyhow::Result;
use serde_json::json;

use meta_ads_mcp_server::{
    config::GraphApiConfig,
    external::GraphApiClient,
    tools::{
        adapter::{normalize_account_id, resolve_reporting_window, EntityStatus, TimeRange},
        GraphToolAdapter, ToolExecutor, ToolId,
    },
};

use common::test_context;

fn adapter() -> Result<GraphToolAdapter> {
    let client = Arc::new(GraphApiClient::new(&GraphApiConfig::default())?);
    Ok(GraphToolAdapter::new(client))
}

#[test]
fn account_id_normalization_adds_the_prefix_once() {
    assert_eq!(normalize_account_id("123456"), "act_123456");
    assert_eq!(normalize_account_id("act_123456"), "act_123456");
}

#[test]
fn status_filters_map_to_graph_effective_status() {
    assert_eq!(
        EntityStatus::Active.as_filter().as_deref(),
        Some("[\"ACTIVE\"]")
    );
    assert_eq!(
        EntityStatus::Paused.as_filter().as_deref(),
        Some("[\"PAUSED\"]")
    );
    assert_eq!(
        EntityStatus::Archived.as_filter().as_deref(),
        Some("[\"ARCHIVED\"]")
    );
    assert_eq!(EntityStatus::All.as_filter(), None);
}

#[test]
fn reporting_window_defaults_to_last_7d() {
    let (key, value) = resolve_reporting_window(None, None);
    assert_eq!(key, "date_preset");
    assert_eq!(value, "last_7d");
}

#[test]
fn explicit_time_range_becomes_a_json_parameter() {
    let range = TimeRange {
        since: "2026-01-01".to_owned(),
        until: "2026-01-31".to_owned(),
    };
    let (key, value) = resolve_reporting_window(None, Some(&range));
    assert_eq!(key, "time_range");
    let parsed: serde_json::Value = serde_json::from_str(&value).unwrap();
    assert_eq!(parsed["since"], "2026-01-01");
    assert_eq!(parsed["until"], "2026-01-31");
}

#[test]
fn date_preset_wins_over_time_range() {
    let range = TimeRange {
        since: "2026-01-01".to_owned(),
        until: "2026-01-31".to_owned(),
    };
    let (key, value) = resolve_reporting_window(Some("last_30d".to_owned()), Some(&range));
    assert_eq!(key, "date_preset");
    assert_eq!(value, "last_30d");
}

#[tokio::test]
async fn missing_required_argument_fails_before_any_network_call() -> Result<()> {
    let adapter = adapter()?;
    let ctx = test_context();

    let error = adapter
        .execute(ToolId::GetCampaignInsights, &json!({}), &ctx)
        .await
        .unwrap_err();
    assert_eq!(error.code, "invalid_arguments");
    assert!(error.message.contains("campaign_id"));

    let error = adapter
        .execute(ToolId::SearchCampaigns, &json!({ "limit": 10 }), &ctx)
        .await
        .unwrap_err();
    assert_eq!(error.code, "invalid_arguments");
    assert!(error.message.contains("query"));
    Ok(())
}

#[tokio::test]
async fn wrongly_typed_arguments_are_rejected() -> Result<()> {
    let adapter = adapter()?;
    let ctx = test_context();

    let error = adapter
        .execute(
            ToolId::ListCampaigns,
            &json!({ "status": "running" }),
            &ctx,
        )
        .await
        .unwrap_err();
    assert_eq!(error.code, "invalid_arguments");

    let error = adapter
        .execute(
            ToolId::GetAdInsights,
            &json!({ "ad_id": "123", "time_range": { "since": "2026-01-01" } }),
            &ctx,
        )
        .await
        .unwrap_err();
    assert_eq!(error.code, "invalid_arguments");
    assert!(error.message.contains("until"));
    Ok(())
}

#[tokio::test]
async fn account_tools_reject_tokens_without_accounts() -> Result<()> {
    let adapter = adapter()?;
    let mut ctx = test_context();
    ctx.ad_account_ids.clear();

    let error = adapter
        .execute(ToolId::ListCampaigns, &json!({}), &ctx)
        .await
        .unwrap_err();
    assert_eq!(error.code, "invalid_arguments");
    Ok(())
}
