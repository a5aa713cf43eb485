use axum::{
    Router,
    routing::{get, post},
};

use super::handlers;
use crate::state::AppState;
use crate::whatsapp;

pub fn get_routes() -> Router<AppState> {
    Router::new()
        .route("/budget/plan", post(handlers::plan_budget))
        .route("/luck", get(handlers::spin_luck))
        .route("/whatsapp/link", get(whatsapp::handlers::get_link))
}
