use axum::{
    Router,
    routing::{get, post},
};

use super::handlers;
use crate::state::AppState;

pub fn get_routes() -> Router<AppState> {
    Router::new()
        .route("/support/sessions", post(handlers::open_session))
        .route(
            "/support/sessions/{id}/messages",
            get(handlers::visitor_messages).post(handlers::visitor_send),
        )
        .route("/support/sessions/{id}/ws", get(handlers::visitor_ws))
        .route("/admin/support/sessions", get(handlers::list_sessions))
        .route(
            "/admin/support/sessions/{id}/messages",
            get(handlers::admin_messages).post(handlers::admin_reply),
        )
        .route("/admin/support/sessions/{id}/close", post(handlers::close_session))
        .route("/admin/support/ws", get(handlers::inbox_ws))
}
