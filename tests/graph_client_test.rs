// ABOUTME: Graph API client tests against a local stub server
// ABOUTME: Exercises response caching, cache-key isolation, and TTL behavior without external network
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

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{extract::State, http::Uri, Json, Router};
use serde_json::{json, Value};

use meta_ads_mcp_server::{config::GraphApiConfig, external::GraphApiClient};

const TOKEN: &str = "stub-token";

async fn stub_handler(State(hits): State<Arc<AtomicUsize>>, uri: Uri) -> Json<Value> {
    let hit = hits.fetch_add(1, Ordering::SeqCst) + 1;
    Json(json!({
        "path": uri.path(),
        "query": uri.query(),
        "hit": hit,
    }))
}

/// Spawn a catch-all echo server; returns its base URL and the hit counter
async fn spawn_stub_server() -> Result<(String, Arc<AtomicUsize>)> {
    let hits = Arc::new(AtomicUsize::new(0));
    let router = Router::new()
        .fallback(stub_handler)
        .with_state(hits.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Ok((format!("http://{addr}"), hits))
}

fn client_config(base_url: &str, cache_ttl_secs: u64) -> GraphApiConfig {
    GraphApiConfig {
        base_url: base_url.to_owned(),
        api_version: "v21.0".to_owned(),
        timeout_secs: 5,
        cache_capacity: 16,
        cache_ttl_secs,
    }
}

#[tokio::test]
async fn repeated_request_is_served_from_cache() -> Result<()> {
    let (base_url, hits) = spawn_stub_server().await?;
    let client = GraphApiClient::new(&client_config(&base_url, 300))?;
    let query = [("fields", "impressions".to_owned())];

    let first = client.get(TOKEN, "act_1/insights", &query).await?;
    assert!(!first.cached);
    assert_eq!(first.body["hit"], 1);

    let second = client.get(TOKEN, "act_1/insights", &query).await?;
    assert!(second.cached);
    assert_eq!(second.body, first.body);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn queries_with_embedded_separators_get_distinct_cache_entries() -> Result<()> {
    let (base_url, hits) = spawn_stub_server().await?;
    let client = GraphApiClient::new(&client_config(&base_url, 300))?;

    // Two pairs vs one pair whose value embeds the pair separators; the wire
    // queries differ, so the responses must too.
    let two_pairs = [
        ("fields", "impressions".to_owned()),
        ("date_preset", "last_7d".to_owned()),
    ];
    let one_pair = [("fields", "impressions&date_preset=last_7d".to_owned())];

    let first = client.get(TOKEN, "act_1/insights", &two_pairs).await?;
    let second = client.get(TOKEN, "act_1/insights", &one_pair).await?;

    assert!(!first.cached);
    assert!(!second.cached, "differently-shaped request must not hit the cache");
    assert_ne!(first.body["query"], second.body["query"]);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
    Ok(())
}

#[tokio::test]
async fn distinct_tokens_get_distinct_cache_entries() -> Result<()> {
    let (base_url, hits) = spawn_stub_server().await?;
    let client = GraphApiClient::new(&client_config(&base_url, 300))?;
    let query = [("fields", "impressions".to_owned())];

    let first = client.get("token-a", "act_1/insights", &query).await?;
    let second = client.get("token-b", "act_1/insights", &query).await?;

    assert!(!first.cached);
    assert!(!second.cached);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
    Ok(())
}

#[tokio::test]
async fn zero_ttl_disables_caching() -> Result<()> {
    let (base_url, hits) = spawn_stub_server().await?;
    let client = GraphApiClient::new(&client_config(&base_url, 0))?;
    let query = [("fields", "impressions".to_owned())];

    let first = client.get(TOKEN, "act_1/insights", &query).await?;
    let second = client.get(TOKEN, "act_1/insights", &query).await?;

    assert!(!first.cached);
    assert!(!second.cached);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
    Ok(())
}

#[tokio::test]
async fn expired_cache_entries_are_refetched() -> Result<()> {
    let (base_url, hits) = spawn_stub_server().await?;
    let client = GraphApiClient::new(&client_config(&base_url, 1))?;
    let query = [("fields", "impressions".to_owned())];

    let first = client.get(TOKEN, "act_1/insights", &query).await?;
    assert!(!first.cached);

    tokio::time::sleep(Duration::from_millis(1100)).await;

    let second = client.get(TOKEN, "act_1/insights", &query).await?;
    assert!(!second.cached, "entry past the TTL must be refetched");
    assert_eq!(second.body["hit"], 2);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
    Ok(())
}
