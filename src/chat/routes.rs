use axum::{Router, routing::get};

use super::handlers;
use crate::state::AppState;

pub fn get_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/requests/{id}/messages",
            get(handlers::get_messages).post(handlers::send_message),
        )
        .route("/requests/{id}/messages/ws", get(handlers::messages_ws))
}
