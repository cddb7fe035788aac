//! LeakCheck Database Layer
//!
//! Provides the `SQLite` breach-record store that answers lookups for real.
//! Uses `SQLx` with embedded migrations.
//!
//! # Schema
//!
//! - `breaches` - catalogue of breach incidents (name, date, record count)
//! - `leaked_data` - identifiers observed in each breach, keyed by
//!   `(data_type, data_value)` for exact-match lookup
//!
//! # Example
//!
//! ```ignore
//! use leakcheck_db::Database;
//!
//! let db = Database::new("leakcheck.db", 5).await?;
//! db.run_migrations().await?;
//! let result = db.lookup(QueryKind::Email, "a@b.com").await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod backend;
pub mod breaches;
pub mod connection;
pub mod error;
pub mod leaks;
pub mod migrations;

// Re-export commonly used types
pub use backend::StoreBackend;
pub use breaches::NewBreach;
pub use error::{DatabaseError, Result};

use leakcheck_core::{BreachRecord, DatabaseConfig, LeakResult, QueryKind};
use sqlx::{Pool, Sqlite};
use std::path::Path;

/// High-level handle on the breach store.
#[derive(Debug, Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Open (creating if needed) the database at `path`.
    pub async fn new(path: impl AsRef<Path>, max_connections: u32) -> Result<Self> {
        let pool = connection::open_pool(path, max_connections).await?;
        Ok(Self { pool })
    }

    /// Open the database described by `config`.
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self> {
        let path = config
            .resolved_path()
            .map_err(|e| DatabaseError::Open(e.to_string()))?;
        Self::new(path, config.max_connections).await
    }

    /// Open a private in-memory database.
    pub async fn in_memory() -> Result<Self> {
        Self::new(":memory:", 1).await
    }

    /// Wrap an existing pool.
    #[must_use]
    pub fn from_pool(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Run all pending database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        migrations::run_migrations(&self.pool).await
    }

    /// Get the current schema version.
    pub async fn get_schema_version(&self) -> Result<i64> {
        migrations::get_schema_version(&self.pool).await
    }

    /// Get a reference to the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Classify `value` of `kind` against the store.
    pub async fn lookup(&self, kind: QueryKind, value: &str) -> Result<LeakResult> {
        leaks::lookup(&self.pool, kind, value).await
    }

    /// List every catalogued breach, most recent first.
    pub async fn list_breaches(&self) -> Result<Vec<BreachRecord>> {
        breaches::list_breaches(&self.pool).await
    }

    /// Close the connection pool gracefully.
    pub async fn close(self) {
        self.pool.close().await;
        tracing::info!("Database pool closed");
    }
}
