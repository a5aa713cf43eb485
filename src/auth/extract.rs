use axum::{
    extract::{FromRef, FromRequestParts, OptionalFromRequestParts, Query},
    http::{header::AUTHORIZATION, request::Parts},
};
use serde::Deserialize;
use std::sync::Arc;

use super::models::AccessTokenClaims;
use super::token::decode_token;
use crate::config::Config;
use crate::utils::{error::ApiError, unauthorized};

#[derive(Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Bearer header first, then `?token=` for WebSocket upgrades where browsers can't set headers.
fn raw_token(parts: &Parts) -> Option<String> {
    if let Some(value) = parts.headers.get(AUTHORIZATION) {
        return value
            .to_str()
            .ok()
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(|v| v.trim().to_owned());
    }

    Query::<TokenQuery>::try_from_uri(&parts.uri)
        .ok()
        .and_then(|Query(query)| query.token)
        .filter(|token| !token.is_empty())
}

fn claims_from_parts(parts: &Parts, config: &Config) -> Result<Option<AccessTokenClaims>, ApiError> {
    match raw_token(parts) {
        Some(token) => decode_token(&token, &config.jwt_secret)
            .map(Some)
            .map_err(|e| {
                tracing::debug!("rejected access token: {}", e);
                unauthorized("Invalid or expired token")
            }),
        None => Ok(None),
    }
}

impl<S> FromRequestParts<S> for AccessTokenClaims
where
    Arc<Config>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = Arc::<Config>::from_ref(state);
        claims_from_parts(parts, &config)?.ok_or_else(|| unauthorized("Missing access token"))
    }
}

impl<S> OptionalFromRequestParts<S> for AccessTokenClaims
where
    Arc<Config>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        let config = Arc::<Config>::from_ref(state);
        claims_from_parts(parts, &config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_of(req: Request<()>) -> Parts {
        req.into_parts().0
    }

    #[test]
    fn bearer_header_wins_over_query() {
        let parts = parts_of(
            Request::builder()
                .uri("/ws?token=from-query")
                .header(AUTHORIZATION, "Bearer from-header")
                .body(())
                .unwrap(),
        );
        assert_eq!(raw_token(&parts).as_deref(), Some("from-header"));
    }

    #[test]
    fn query_token_is_used_for_sockets() {
        let parts = parts_of(Request::builder().uri("/ws?a=1&token=abc").body(()).unwrap());
        assert_eq!(raw_token(&parts).as_deref(), Some("abc"));
    }

    #[test]
    fn query_token_is_percent_decoded() {
        let parts = parts_of(
            Request::builder()
                .uri("/ws?token=abc%2Edef%2Bghi&room=1")
                .body(())
                .unwrap(),
        );
        assert_eq!(raw_token(&parts).as_deref(), Some("abc.def+ghi"));
    }

    #[test]
    fn non_bearer_header_yields_nothing() {
        let parts = parts_of(
            Request::builder()
                .uri("/")
                .header(AUTHORIZATION, "Basic Zm9vOmJhcg==")
                .body(())
                .unwrap(),
        );
        assert_eq!(raw_token(&parts), None);
    }
}
