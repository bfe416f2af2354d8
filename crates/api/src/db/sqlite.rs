use anyhow::{anyhow, Context, Result};
use log::info;
use sqlx::{
    pool::PoolConnection,
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
    Sqlite,
};
use std::{str::FromStr, time::Duration};

use super::schema::verify_schema;

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the observation database read-only. The file must already exist.
    pub async fn new(path: &str, max_connections: u32) -> Result<Self> {
        if !climate_api_core::is_file(path) {
            return Err(anyhow!("observation database not found at: {}", path));
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
            .read_only(true)
            .pragma("busy_timeout", "5000")
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "MEMORY");

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await
            .context("Failed to create database connection pool")?;

        let db = Self::from_pool(pool);
        db.health_check().await?;
        info!("SQLite observation database opened at: {}", path);

        Ok(db)
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Checks out a connection for a single unit of work. It goes back to the
    /// pool when the guard is dropped, including on early returns.
    pub async fn session(&self) -> Result<PoolConnection<Sqlite>, sqlx::Error> {
        self.pool.acquire().await
    }

    /// Check database connectivity and that the expected tables are present.
    pub async fn health_check(&self) -> Result<()> {
        let mut conn = self
            .session()
            .await
            .context("Failed to acquire database connection")?;

        sqlx::query("SELECT 1")
            .fetch_one(&mut *conn)
            .await
            .context("Database connectivity check failed")?;

        verify_schema(&mut conn)
            .await
            .context("Observation database schema check failed")?;

        Ok(())
    }
}
