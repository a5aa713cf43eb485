use axum::{extract::FromRequestParts, http::request::Parts};

use crate::utils::{error::ApiError, unauthorized};

pub const VISITOR_TOKEN_HEADER: &str = "x-visitor-token";

/// The `X-Visitor-Token` header proving ownership of a support session.
#[derive(Debug, Clone)]
pub struct VisitorToken(pub String);

impl<S> FromRequestParts<S> for VisitorToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(VISITOR_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| VisitorToken(v.to_owned()))
            .ok_or_else(|| unauthorized("Missing visitor token"))
    }
}
