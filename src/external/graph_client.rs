// ABOUTME: Meta Graph API client with cache-aside response caching and typed error mapping
// ABOUTME: Translates Graph error envelopes into ToolError codes the protocol layer can surface
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Meta Graph API client
//!
//! Thin GET-only client for the ads-metrics surface of the Graph API.
//! Responses are cached with a bounded LRU keyed by path, query, and token
//! so repeated tool calls within the TTL are served locally; the `cached`
//! flag on [`GraphResponse`] is informational and surfaced in logs only.
//!
//! # API Reference
//! Meta Marketing API: <https://developers.facebook.com/docs/marketing-apis>

use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use lru::LruCache;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::GraphApiConfig;
use crate::errors::{AppError, AppResult, ToolError};

/// Error envelope returned by the Graph API on non-2xx responses
#[derive(Debug, Deserialize)]
struct GraphErrorEnvelope {
    error: GraphErrorBody,
}

#[derive(Debug, Deserialize)]
struct GraphErrorBody {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
    code: Option<i64>,
    error_subcode: Option<i64>,
}

/// A Graph API response with cache provenance
#[derive(Debug, Clone)]
pub struct GraphResponse {
    /// Parsed JSON body
    pub body: Value,
    /// True when served from the local response cache
    pub cached: bool,
}

struct CacheEntry {
    body: Value,
    fetched_at: Instant,
}

/// GET-only Graph API client with bounded response caching
pub struct GraphApiClient {
    http: Client,
    base: String,
    cache: Mutex<LruCache<String, CacheEntry>>,
    cache_ttl: Duration,
}

impl GraphApiClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the underlying HTTP client cannot be built.
    pub fn new(config: &GraphApiConfig) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;

        let capacity =
            NonZeroUsize::new(config.cache_capacity.max(1)).unwrap_or(NonZeroUsize::MIN);

        Ok(Self {
            http,
            base: format!(
                "{}/{}",
                config.base_url.trim_end_matches('/'),
                config.api_version
            ),
            cache: Mutex::new(LruCache::new(capacity)),
            cache_ttl: Duration::from_secs(config.cache_ttl_secs),
        })
    }

    /// Issue a GET against `{base}/{version}/{path}` with the given query
    /// pairs and access token.
    ///
    /// # Errors
    /// Returns a [`ToolError`] with a mapped code on any transport or
    /// Graph-level failure.
    pub async fn get(
        &self,
        access_token: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<GraphResponse, ToolError> {
        let cache_key = Self::cache_key(access_token, path, query);

        if let Some(body) = self.cache_lookup(&cache_key) {
            debug!(path = path, "Graph API response served from cache");
            return Ok(GraphResponse { body, cached: true });
        }

        let url = format!("{}/{}", self.base, path.trim_start_matches('/'));
        let response = self
            .http
            .get(&url)
            .query(query)
            .query(&[("access_token", access_token)])
            .send()
            .await
            .map_err(|e| ToolError::network(format!("Graph API request failed: {e}")))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| ToolError::network(format!("Graph API returned invalid JSON: {e}")))?;

        if !status.is_success() {
            return Err(Self::map_graph_error(status.as_u16(), &body));
        }

        self.cache_store(cache_key, &body);
        Ok(GraphResponse {
            body,
            cached: false,
        })
    }

    /// Map a Graph error envelope to a typed [`ToolError`].
    ///
    /// Code reference: 190 = invalid/expired token, 4/17/32/613 = throttling,
    /// 803 = unknown alias, 100 subcode 33 = unknown object ID.
    fn map_graph_error(status: u16, body: &Value) -> ToolError {
        let Ok(envelope) = serde_json::from_value::<GraphErrorEnvelope>(body.clone()) else {
            return ToolError::upstream(format!("Graph API error (HTTP {status})"));
        };

        let e = envelope.error;
        let message = format!(
            "Graph API error {}: {}",
            e.code.unwrap_or_else(|| i64::from(status)),
            e.message
        );

        match (e.code, e.error_subcode, e.error_type.as_deref()) {
            (Some(190), _, _) | (_, _, Some("OAuthException")) => ToolError::auth_expired(message),
            (Some(4 | 17 | 32 | 613), _, _) => ToolError::rate_limited(message),
            (Some(803), _, _) | (Some(100), Some(33), _) => ToolError::not_found(message),
            _ => ToolError::upstream(message),
        }
    }

    /// Key mirrors the percent-encoded wire query so pairs whose values embed
    /// `=`/`&` cannot collide with a differently-shaped request.
    fn cache_key(access_token: &str, path: &str, query: &[(&str, String)]) -> String {
        let mut encoded = url::form_urlencoded::Serializer::new(String::new());
        for (name, value) in query {
            encoded.append_pair(name, value);
        }
        format!("{path}?{}|{access_token}", encoded.finish())
    }

    fn cache_lookup(&self, key: &str) -> Option<Value> {
        if self.cache_ttl.is_zero() {
            return None;
        }
        let Ok(mut cache) = self.cache.lock() else {
            warn!("Graph API cache lock poisoned, skipping lookup");
            return None;
        };
        match cache.get(key) {
            Some(entry) if entry.fetched_at.elapsed() < self.cache_ttl => {
                Some(entry.body.clone())
            }
            Some(_) => {
                cache.pop(key);
                None
            }
            None => None,
        }
    }

    fn cache_store(&self, key: String, body: &Value) {
        if self.cache_ttl.is_zero() {
            return;
        }
        if let Ok(mut cache) = self.cache.lock() {
            cache.put(
                key,
                CacheEntry {
                    body: body.clone(),
                    fetched_at: Instant::now(),
                },
            );
        }
    }
}
