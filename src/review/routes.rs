use axum::{
    Router,
    routing::{get, post},
};

use super::handlers;
use crate::state::AppState;

pub fn get_routes() -> Router<AppState> {
    Router::new()
        .route("/requests/{id}/review", post(handlers::create_review))
        .route("/profiles/{id}/reviews", get(handlers::get_profile_reviews))
}
