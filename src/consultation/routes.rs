use axum::{
    Router,
    routing::{get, post},
};

use super::handlers;
use crate::state::AppState;

pub fn get_routes() -> Router<AppState> {
    Router::new()
        .route("/consultations", post(handlers::create_consultation))
        .route("/admin/consultations", get(handlers::list_consultations))
}
