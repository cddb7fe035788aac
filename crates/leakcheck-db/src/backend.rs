//! Lookup backend backed by the local breach store.

use crate::Database;
use async_trait::async_trait;
use leakcheck_core::{LeakResult, QueryKind};
use leakcheck_lookup::{LookupBackend, LookupError};

/// Answers lookups straight from the breach store.
#[derive(Debug, Clone)]
pub struct StoreBackend {
    db: Database,
}

impl StoreBackend {
    /// Create a backend over `db`.
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LookupBackend for StoreBackend {
    async fn lookup(&self, value: &str, kind: QueryKind) -> leakcheck_lookup::Result<LeakResult> {
        self.db.lookup(kind, value).await.map_err(|e| {
            tracing::error!("Breach store lookup failed: {}", e);
            LookupError::Store(e.to_string())
        })
    }

    fn backend_id(&self) -> &str {
        "store"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breaches::{insert_breach, NewBreach};
    use crate::leaks::record_leak;
    use leakcheck_core::Severity;

    #[tokio::test]
    async fn test_store_backend_lookup() {
        let db = Database::in_memory().await.expect("create db");
        db.run_migrations().await.expect("run migrations");
        let breach = insert_breach(db.pool(), NewBreach::new("Dropbox", "2012", 68_000_000))
            .await
            .expect("insert breach");
        record_leak(db.pool(), breach.id, QueryKind::Email, "a@b.com")
            .await
            .expect("record leak");

        let backend = StoreBackend::new(db);
        let result = backend.lookup("a@b.com", QueryKind::Email).await.expect("lookup");
        assert_eq!(result.severity(), Severity::Warning);
        assert_eq!(result.breaches(), ["Dropbox 2012"]);
    }

    #[tokio::test]
    async fn test_store_failure_maps_to_lookup_error() {
        // No migrations: the tables do not exist.
        let db = Database::in_memory().await.expect("create db");
        let backend = StoreBackend::new(db);

        let err = backend
            .lookup("a@b.com", QueryKind::Email)
            .await
            .unwrap_err();
        assert!(matches!(err, LookupError::Store(_)));
    }
}
