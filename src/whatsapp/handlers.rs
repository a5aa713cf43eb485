use axum::extract::{Json, Query, State};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{chat_link, default_message, normalize_phone};
use crate::config::Config;

#[derive(Debug, Deserialize)]
pub struct LinkQuery {
    pub phone: Option<String>,
    pub vendor: Option<String>,
    pub service: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub phone: String,
    pub message: String,
    pub url: String,
}

pub async fn get_link(
    State(config): State<Arc<Config>>,
    Query(query): Query<LinkQuery>,
) -> Json<LinkResponse> {
    let phone = query
        .phone
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| config.support_phone.clone());

    let message = query
        .message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| default_message(query.vendor.as_deref(), query.service.as_deref()));

    Json(LinkResponse {
        url: chat_link(&phone, &message),
        phone: normalize_phone(&phone),
        message,
    })
}
