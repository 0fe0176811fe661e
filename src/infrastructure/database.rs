// src/infrastructure/database.rs
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::time::Duration;
use tokio::sync::OnceCell;

/// Process-wide Postgres pool, opened on first use.
///
/// Concurrent first callers share a single in-flight connection attempt. A
/// failed attempt is not cached: the next `acquire` tries again.
pub struct LazyPool {
    database_url: String,
    max_connections: u32,
    acquire_timeout: Duration,
    cell: OnceCell<PgPool>,
}

impl LazyPool {
    pub fn new(database_url: impl Into<String>, max_connections: u32, acquire_timeout: Duration) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections,
            acquire_timeout,
            cell: OnceCell::new(),
        }
    }

    pub async fn acquire(&self) -> Result<&PgPool, sqlx::Error> {
        self.cell
            .get_or_try_init(|| async {
                tracing::info!(max_connections = self.max_connections, "opening database pool");
                PgPoolOptions::new()
                    .max_connections(self.max_connections)
                    .acquire_timeout(self.acquire_timeout)
                    .connect(&self.database_url)
                    .await
                    .inspect_err(|err| tracing::error!(error = %err, "database connection failed"))
            })
            .await
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
