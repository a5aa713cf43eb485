use diesel::Connection;
use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_async::{AsyncPgConnection, pooled_connection::AsyncDieselConnectionManager};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::utils::types::Pool;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/");

type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub async fn get_pool(db_url: &str) -> Result<Pool, String> {
    let config = AsyncDieselConnectionManager::<AsyncPgConnection>::new(db_url);
    let pool = bb8::Pool::builder()
        .max_size(16)
        .build(config)
        .await
        .map_err(|e| format!("Failed to create db pool: {}", e))?;

    Ok(pool)
}

/// A pool that only connects on first checkout.
pub fn lazy_pool(db_url: &str) -> Pool {
    let config = AsyncDieselConnectionManager::<AsyncPgConnection>::new(db_url);
    bb8::Pool::builder().build_unchecked(config)
}

pub async fn run_migrations(db_url: String) -> Result<usize, BoxError> {
    tokio::task::spawn_blocking(move || -> Result<usize, BoxError> {
        let mut conn = AsyncConnectionWrapper::<AsyncPgConnection>::establish(&db_url)?;
        let applied = conn.run_pending_migrations(MIGRATIONS)?;
        Ok(applied.len())
    })
    .await?
}
