// src/config/db.rs
// DOCUMENTATION: Database connection pool initialization
// PURPOSE: Setup and validate the PostgreSQL connection pool

use crate::config::Config;
use crate::db::Database;
use crate::errors::PostsError;
use sqlx::postgres::PgConnectOptions;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Idle connections above the minimum are closed after this long
const IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Connections are recycled after this long regardless of activity
const MAX_LIFETIME: Duration = Duration::from_secs(60 * 60);

/// Parsed, validated pool settings
#[derive(Clone)]
pub struct PoolConfig {
    pub connect_options: PgConnectOptions,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl fmt::Debug for PoolConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolConfig")
            .field("target", &self.describe())
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .field("idle_timeout", &self.idle_timeout)
            .field("max_lifetime", &self.max_lifetime)
            .finish()
    }
}

impl PoolConfig {
    /// Parse the connection string and check pool bounds
    /// Fails with ConfigError when the string is empty or malformed
    pub fn configure(
        connection_string: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, PostsError> {
        let connection_string = connection_string.trim();
        if connection_string.is_empty() {
            return Err(PostsError::ConfigError(
                "connection string is empty".to_string(),
            ));
        }

        let connect_options = PgConnectOptions::from_str(connection_string)
            .map_err(|e| PostsError::ConfigError(format!("invalid connection string: {}", e)))?;

        if max_connections == 0 {
            return Err(PostsError::ConfigError(
                "max_connections must be at least 1".to_string(),
            ));
        }
        if min_connections > max_connections {
            return Err(PostsError::ConfigError(format!(
                "min_connections ({}) exceeds max_connections ({})",
                min_connections, max_connections
            )));
        }

        Ok(Self {
            connect_options,
            max_connections,
            min_connections,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: IDLE_TIMEOUT,
            max_lifetime: MAX_LIFETIME,
        })
    }

    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    /// Connection target without credentials, safe to log
    pub fn describe(&self) -> String {
        format!(
            "{}:{}/{}",
            self.connect_options.get_host(),
            self.connect_options.get_port(),
            self.connect_options.get_database().unwrap_or("<default>")
        )
    }
}

/// Initialize PostgreSQL connection pool
/// DOCUMENTATION: Configures the pool, opens it lazily and runs the
/// startup connectivity check. Called once during application startup in
/// main.rs; any error here is fatal.
pub async fn init_db_pool(config: &Config) -> Result<Database, PostsError> {
    let pool_config = PoolConfig::configure(
        &config.database_url,
        config.db_max_connections,
        config.db_min_connections,
    )?
    .with_acquire_timeout(config.acquire_timeout());

    log::info!(
        "Initializing database pool: {} (max={}, min={})",
        pool_config.describe(),
        pool_config.max_connections,
        pool_config.min_connections
    );

    let db = Database::open(pool_config);

    // Verify connection works
    if let Err(e) = db.verify(config.verify_timeout()).await {
        db.close().await;
        return Err(e);
    }

    log::info!("Database pool initialized successfully");
    Ok(db)
}
