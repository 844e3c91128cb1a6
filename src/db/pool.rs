// src/db/pool.rs
// DOCUMENTATION: Shared PostgreSQL pool handle
// PURPOSE: Lazy pool lifecycle, connectivity check and deadline-bounded queries

use crate::config::db::PoolConfig;
use crate::db::rows::collect_rows;
use crate::deadline::Deadline;
use crate::errors::PostsError;
use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgArguments, PgPool, PgPoolOptions, PgRow};
use sqlx::{Connection, Postgres};
use std::time::Duration;

/// Cloneable handle to the connection pool, safe to share across workers
#[derive(Clone, Debug)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Build the pool without opening any connection.
    /// Connections are created on demand up to `max_connections` and idle
    /// ones are reclaimed down to `min_connections`.
    pub fn open(config: PoolConfig) -> Self {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(config.idle_timeout)
            .max_lifetime(config.max_lifetime)
            .connect_lazy_with(config.connect_options);

        Self { pool }
    }

    /// Check out a connection, waiting while the pool is saturated.
    /// It returns to the pool when dropped.
    pub async fn acquire(&self) -> Result<PoolConnection<Postgres>, sqlx::Error> {
        self.pool.acquire().await
    }

    /// Round-trip to the server within `timeout`.
    pub async fn verify(&self, timeout: Duration) -> Result<(), PostsError> {
        let ping = async {
            let mut conn = self.acquire().await?;
            conn.ping().await
        };

        match tokio::time::timeout(timeout, ping).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(PostsError::ConnectivityError(e.to_string())),
            Err(_) => Err(PostsError::ConnectivityError(format!(
                "no response within {:?}",
                timeout
            ))),
        }
    }

    /// Run `sql` and decode every row, giving up when `deadline` passes.
    ///
    /// The connection is checked out by the row stream and goes back to the
    /// pool when the stream is dropped, whichever way this function exits.
    pub async fn query<T, F>(
        &self,
        deadline: &Deadline,
        sql: &str,
        args: PgArguments,
        decode: F,
    ) -> Result<Vec<T>, PostsError>
    where
        F: FnMut(&PgRow) -> Result<T, sqlx::Error>,
    {
        if deadline.is_expired() {
            return Err(PostsError::QueryError("deadline exceeded".to_string()));
        }

        let rows = sqlx::query_with(sql, args).fetch(&self.pool);
        collect_rows(rows, deadline, decode).await
    }

    /// Stop handing out connections, wait for checked-out ones to come back
    /// and close everything. Safe to call more than once.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Live connections (idle and in use)
    pub fn size(&self) -> u32 {
        self.pool.size()
    }
}
