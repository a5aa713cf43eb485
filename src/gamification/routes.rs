use axum::{Router, routing::get};

use super::handlers;
use crate::state::AppState;

pub fn get_routes() -> Router<AppState> {
    Router::new().route("/points", get(handlers::get_my_points))
}
