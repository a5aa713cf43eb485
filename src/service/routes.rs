use axum::{
    Router,
    routing::{get, post},
};

use super::handlers;
use crate::state::AppState;

pub fn get_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/services",
            get(handlers::get_services).post(handlers::create_service),
        )
        .route("/services/mine", get(handlers::get_my_services))
        .route(
            "/services/{id}",
            get(handlers::get_service_by_id)
                .patch(handlers::update_service)
                .delete(handlers::delete_service),
        )
        .route("/services/{id}/toggle", post(handlers::toggle_service))
        .route("/services/{id}/packages", post(handlers::create_package))
}
