use axum::{Router, routing::get};

use super::handlers;
use crate::state::AppState;

pub fn get_routes() -> Router<AppState> {
    Router::new().route("/search", get(handlers::search_services))
}
