//! Backend selection from configuration.

use anyhow::Context;
use leakcheck_core::{AppConfig, BackendKind};
use leakcheck_db::{Database, StoreBackend};
use leakcheck_lookup::{HttpBackend, LookupBackend, StandInBackend, TokioDelay};
use std::sync::Arc;

/// Build the lookup backend named by `config.backend.kind`.
pub async fn from_config(config: &AppConfig) -> anyhow::Result<Arc<dyn LookupBackend>> {
    let backend: Arc<dyn LookupBackend> = match config.backend.kind {
        BackendKind::StandIn => {
            tracing::warn!("Using the stand-in backend: results are random, not real");
            Arc::new(StandInBackend::new(
                Arc::new(TokioDelay),
                config.standin.delay(),
            ))
        }
        BackendKind::Http => Arc::new(
            HttpBackend::from_config(&config.backend).context("failed to create HTTP backend")?,
        ),
        BackendKind::Store => {
            let db = Database::from_config(&config.database)
                .await
                .context("failed to open breach store")?;
            db.run_migrations().await.context("failed to migrate breach store")?;
            Arc::new(StoreBackend::new(db))
        }
    };

    tracing::info!("Lookup backend: {}", backend.backend_id());
    Ok(backend)
}
