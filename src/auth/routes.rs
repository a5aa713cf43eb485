use axum::{
    Router,
    routing::{get, post},
};

use super::handlers;
use crate::state::AppState;

pub fn get_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(handlers::signup))
        .route("/auth/login", post(handlers::login))
        .route("/auth/me", get(handlers::get_current_user))
}
