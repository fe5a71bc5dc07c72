//! Database connection pool management.

use async_trait::async_trait;
use press_config::DatabaseConfig;
use press_core::{HealthCheck, HealthStatus, Interface, PressError, PressResult};
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use sqlx::ConnectOptions;
use std::sync::Arc;
use tracing::{info, warn};

/// Interface for database pool operations.
///
/// Repositories hold the pool through this trait so tests can swap it out.
#[async_trait]
pub trait DatabasePoolInterface: Interface + Send + Sync {
    /// Returns a reference to the underlying MySQL pool.
    fn inner(&self) -> &MySqlPool;

    /// Checks if the database connection is healthy.
    async fn health_check(&self) -> PressResult<()>;

    /// Closes the database pool.
    async fn close(&self);
}

/// Database pool wrapper.
pub struct DatabasePool {
    pool: MySqlPool,
}

impl DatabasePool {
    /// Creates a new database pool from configuration.
    ///
    /// Connection parameters are passed individually, so passwords with
    /// URL-reserved characters need no escaping.
    pub async fn new(config: &DatabaseConfig) -> PressResult<Self> {
        let target = config.display_target();
        info!("Connecting to MySQL database {}...", target);

        let mut options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.username)
            .password(&config.password)
            .database(&config.name);
        if !config.log_queries {
            options = options.disable_statement_logging();
        }

        let pool = MySqlPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout())
            .idle_timeout(Some(config.idle_timeout()))
            .connect_with(options)
            .await
            .map_err(|e| {
                warn!("Failed to connect to database {}: {}", target, e);
                match e {
                    sqlx::Error::Configuration(inner) => {
                        PressError::Configuration(format!("Invalid connection parameters: {}", inner))
                    }
                    other => PressError::Database(format!("Failed to connect: {}", other)),
                }
            })?;

        info!("MySQL connection pool established");
        Ok(Self { pool })
    }

    /// Wraps an existing pool.
    #[must_use]
    pub fn with_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the underlying pool.
    #[must_use]
    pub fn inner(&self) -> &MySqlPool {
        &self.pool
    }
}

#[async_trait]
impl DatabasePoolInterface for DatabasePool {
    fn inner(&self) -> &MySqlPool {
        &self.pool
    }

    async fn health_check(&self) -> PressResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| PressError::Database(format!("Health check failed: {}", e)))?;
        Ok(())
    }

    async fn close(&self) {
        info!("Closing database connection pool...");
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}

#[async_trait]
impl HealthCheck for DatabasePool {
    fn name(&self) -> &str {
        "mysql"
    }

    /// Unhealthy when `SELECT 1` fails, degraded when every connection is
    /// checked out.
    async fn check(&self) -> HealthStatus {
        if let Err(e) = DatabasePoolInterface::health_check(self).await {
            return HealthStatus::Unhealthy(e.to_string());
        }
        let max = self.pool.options().get_max_connections();
        if self.pool.size() >= max && self.pool.num_idle() == 0 {
            return HealthStatus::Degraded(format!("all {} connections in use", max));
        }
        HealthStatus::Healthy
    }
}

impl std::fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabasePool")
            .field("size", &self.pool.size())
            .field("num_idle", &self.pool.num_idle())
            .finish()
    }
}

/// Creates a shared database pool.
pub async fn create_pool(config: &DatabaseConfig) -> PressResult<Arc<DatabasePool>> {
    let pool = DatabasePool::new(config).await?;
    Ok(Arc::new(pool))
}
