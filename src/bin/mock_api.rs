//! Stand-in backend for frontend work: a banner and the fixed service list.

use axum::{Json, Router, routing::get};
use celebrate_hub::catalog::{MOCK_SERVICES, MockService};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

const DEFAULT_PORT: u16 = 5000;

async fn banner() -> &'static str {
    "🎉 Celebrate Hub API is running!"
}

async fn services() -> Json<&'static [MockService]> {
    Json(MOCK_SERVICES)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let port = match std::env::var("PORT") {
        Ok(raw) => raw.parse()?,
        Err(_) => DEFAULT_PORT,
    };

    let app = Router::new()
        .route("/", get(banner))
        .route("/api/services", get(services))
        .layer(CorsLayer::new().allow_origin(Any));

    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("mock api listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
