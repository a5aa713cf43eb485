use axum::{
    Router,
    routing::{get, patch},
};

use super::handlers;
use crate::state::AppState;

pub fn get_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/bookings",
            get(handlers::get_my_bookings).post(handlers::create_booking),
        )
        .route("/bookings/{id}/status", patch(handlers::update_booking_status))
}
