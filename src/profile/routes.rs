use axum::{
    Router,
    routing::{get, patch},
};

use super::handlers;
use crate::state::AppState;

pub fn get_routes() -> Router<AppState> {
    Router::new()
        .route("/profiles/me", patch(handlers::update_my_settings))
        .route("/profiles/{id}", get(handlers::get_profile_by_id))
        .route("/vendors/compare", get(handlers::compare_vendors_handler))
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/admin/profiles/{id}/approval", patch(handlers::set_approval))
}
