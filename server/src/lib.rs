//! LeakCheck application shell.
//!
//! Wires configuration, logging and the lookup crates into the `leakcheck`
//! binary: an HTTP lookup service (`serve`) and a one-shot terminal client
//! (`check`). Core logic lives in the `crates/` directory.

pub mod backends;
pub mod cli;
mod error;
pub mod render;
pub mod routes;
mod state;

pub use error::ApiError;
pub use state::AppState;

use anyhow::Context;
use leakcheck_core::{AppConfig, Identifier, QueryKind};
use leakcheck_db::Database;
use leakcheck_lookup::{NoticeLevel, Notifier, SessionController, SessionState};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Initialize tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,leakcheck=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Load configuration from `path` (or the XDG path) and apply env overrides.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let mut config = match path {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
    .context("failed to load configuration")?;
    config.apply_env_overrides(|key| std::env::var(key).ok());
    Ok(config)
}

/// Run the lookup service until the process is stopped.
pub async fn serve(config: &AppConfig) -> anyhow::Result<()> {
    let db = Database::from_config(&config.database)
        .await
        .context("failed to open breach store")?;
    db.run_migrations()
        .await
        .context("failed to migrate breach store")?;

    let app = routes::router(AppState::new(db), &config.server);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_addr))?;
    info!("Lookup service listening on {}", config.server.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Notifier that prints notices on stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, message: &str, level: NoticeLevel) {
        eprintln!("{level}: {message}");
    }
}

/// Look up one identifier, writing progress and the result to `out`.
///
/// Invalid input is returned as an error before any backend is opened.
/// Lookup failures are not errors: they come back as
/// [`SessionState::Failed`].
pub async fn check(
    config: &AppConfig,
    kind: QueryKind,
    value: &str,
    out: &mut (dyn Write + Send),
) -> anyhow::Result<SessionState> {
    let identifier = Identifier::new(value, kind)?;

    let backend = backends::from_config(config).await?;
    let session = SessionController::new(backend, Arc::new(StderrNotifier));
    let pending = session.begin(identifier)?;
    writeln!(out, "{}", render::render_state(&SessionState::Pending))?;

    let state = match pending.resolve().await {
        Ok(result) => SessionState::Resolved(result),
        Err(e) => SessionState::Failed(e),
    };
    write!(out, "{}", render::render_state(&state))?;
    Ok(state)
}

/// Process exit status for a finished `check`: 2 when the lookup failed.
#[must_use]
pub fn exit_status(state: &SessionState) -> u8 {
    match state {
        SessionState::Failed(_) => 2,
        _ => 0,
    }
}
