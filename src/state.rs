//! Shared application state for all routes.

use crate::service::ScaleStore;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub scales: ScaleStore,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        AppState {
            scales: ScaleStore::new(pool.clone()),
            pool,
        }
    }
}
