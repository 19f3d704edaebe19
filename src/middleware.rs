// ABOUTME: Request authentication middleware for the MCP transport endpoints
// ABOUTME: Resolves the access token into a CredentialContext stored in request extensions
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication middleware
//!
//! Every `/mcp` transport request must carry a Meta Ads access token, either
//! as the `token` query parameter or an `Authorization: Bearer` header. The
//! middleware resolves it through the [`CredentialResolver`] and stores the
//! resulting [`CredentialContext`] in request extensions; handlers downstream
//! can assume it is present. Resolution failure short-circuits with 401
//! before any session logic runs.
//!
//! [`CredentialResolver`]: crate::auth::CredentialResolver

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::auth::CredentialContext;
use crate::errors::{AppError, AppResult};
use crate::mcp::resources::ServerResources;

/// Pull the access token out of the query string or the Authorization header
fn extract_token(request: &Request) -> Option<String> {
    if let Some(query) = request.uri().query() {
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            if key == "token" && !value.is_empty() {
                return Some(value.into_owned());
            }
        }
    }

    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
}

/// Resolve credentials for one request and attach them as an extension.
///
/// # Errors
/// Returns `AppError::Unauthorized` (HTTP 401) when no token is supplied or
/// the resolver rejects it.
pub async fn auth_middleware(
    State(resources): State<Arc<ServerResources>>,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let token = extract_token(&request)
        .ok_or_else(|| AppError::unauthorized("Missing access token"))?;

    let ctx: CredentialContext = resources.resolver.resolve(&token).await?;
    debug!(user_id = %ctx.user_id, "Request authenticated");
    request.extensions_mut().insert(ctx);

    Ok(next.run(request).await)
}
