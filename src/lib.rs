pub mod auth;
pub mod booking;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod consultation;
pub mod gamification;
pub mod planner;
pub mod pool;
pub mod profile;
pub mod realtime;
pub mod request;
pub mod review;
pub mod schema;
pub mod search;
pub mod service;
pub mod state;
pub mod support;
pub mod utils;
pub mod whatsapp;

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(auth::routes::get_routes())
        .merge(profile::routes::get_routes())
        .merge(service::routes::get_routes())
        .merge(search::routes::get_routes())
        .merge(request::routes::get_routes())
        .merge(booking::routes::get_routes())
        .merge(review::routes::get_routes())
        .merge(chat::routes::get_routes())
        .merge(support::routes::get_routes())
        .merge(gamification::routes::get_routes())
        .merge(consultation::routes::get_routes())
        .merge(planner::routes::get_routes());

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .fallback(utils::handler_404)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
