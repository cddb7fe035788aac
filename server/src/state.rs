//! Shared state for request handlers.

use leakcheck_db::Database;

/// State shared by every request handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Breach store answering lookups
    pub db: Database,
}

impl AppState {
    /// Create state over an opened, migrated store.
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}
