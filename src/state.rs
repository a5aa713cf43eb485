use axum::extract::FromRef;
use std::sync::Arc;

use crate::config::Config;
use crate::realtime::hub::ChatHub;
use crate::utils::types::Pool;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub pool: Pool,
    pub config: Arc<Config>,
    pub hub: ChatHub,
}

impl AppState {
    pub fn new(pool: Pool, config: Config) -> Self {
        AppState {
            pool,
            config: Arc::new(config),
            hub: ChatHub::default(),
        }
    }
}
