//! Database connection and pool management
//!
//! Builds the PostgreSQL pool handed to [`crate::repositories::PgRepository`]
//! and applies the embedded schema migrations.

use crate::config::DatabaseConfig;
use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Pool tuning that is not exposed through configuration
#[derive(Debug, Clone, Copy)]
pub struct PoolTuning {
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl Default for PoolTuning {
    fn default() -> Self {
        Self {
            min_connections: 1,
            acquire_timeout: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(600), // 10 minutes
            max_lifetime: Duration::from_secs(1800), // 30 minutes
        }
    }
}

/// Connect to PostgreSQL using the configured URL and pool size
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    create_pool_with_tuning(config, PoolTuning::default()).await
}

pub async fn create_pool_with_tuning(config: &DatabaseConfig, tuning: PoolTuning) -> Result<PgPool> {
    let connect_options = PgConnectOptions::from_str(&config.url)
        .context("Invalid database URL")?
        .application_name("blog-api");

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(tuning.min_connections.min(config.max_connections))
        .acquire_timeout(tuning.acquire_timeout)
        .idle_timeout(tuning.idle_timeout)
        .max_lifetime(tuning.max_lifetime)
        .connect_with(connect_options)
        .await
        .context("Failed to connect to database")?;

    info!(
        max_connections = config.max_connections,
        "Database pool created"
    );

    Ok(pool)
}

/// Apply the schema under `backend/migrations`
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run migrations")?;
    info!("Database migrations completed successfully");
    Ok(())
}
