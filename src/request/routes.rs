use axum::{
    Router,
    routing::{get, patch},
};

use super::handlers;
use crate::state::AppState;

pub fn get_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/requests",
            get(handlers::get_my_requests).post(handlers::create_request),
        )
        .route("/requests/{id}", get(handlers::get_request_by_id))
        .route("/requests/{id}/status", patch(handlers::update_request_status))
}
