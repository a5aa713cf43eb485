use celebrate_hub::{app, config::Config, pool, state::AppState};
use listenfd::ListenFd;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "celebrate_hub=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let applied = pool::run_migrations(config.database_url.clone()).await?;
    tracing::info!(applied, "database migrations complete");

    let pool = pool::get_pool(&config.database_url).await?;
    let bind_addr = config.bind_addr.clone();
    let app = app(AppState::new(pool, config));

    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        // if we are given a tcp listener on listen fd 0, we use that one
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        // otherwise fall back to the configured address
        None => TcpListener::bind(&bind_addr).await?,
    };

    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
