pub mod models;

use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::env;
use std::time::Duration;

pub type DbPool = Pool<Postgres>;

/// Connection pool sizing and timeouts
#[derive(Debug, Clone, Copy)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 20,
            min_connections: 5,
            acquire_timeout: Duration::from_secs(3),
            idle_timeout: Duration::from_secs(600),
        }
    }
}

impl PoolSettings {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let read = |key: &str| env::var(key).ok().and_then(|v| v.parse::<u64>().ok());

        Self {
            max_connections: read("DB_MAX_CONNECTIONS")
                .map(|v| v as u32)
                .unwrap_or(defaults.max_connections),
            min_connections: read("DB_MIN_CONNECTIONS")
                .map(|v| v as u32)
                .unwrap_or(defaults.min_connections),
            acquire_timeout: read("DB_ACQUIRE_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.acquire_timeout),
            idle_timeout: read("DB_IDLE_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.idle_timeout),
        }
    }
}

pub async fn create_pool(database_url: &str, settings: PoolSettings) -> Result<DbPool, sqlx::Error> {
    tracing::debug!(?settings, "connecting to database");

    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(settings.acquire_timeout)
        .idle_timeout(settings.idle_timeout)
        .connect(database_url)
        .await
}

/// Check that the database answers a trivial query
pub async fn ping(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await.map(|_| ())
}
