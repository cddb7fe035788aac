//! HTTP routes of the lookup service.
//!
//! - `GET /check-leak?type=<email|phone|login>&value=<v>` classifies one identifier
//! - `GET /breaches` lists the breach catalogue, most recent first
//! - `GET /health` liveness probe

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::http::{header, Method, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use leakcheck_core::{BreachRecord, Identifier, LeakResult, QueryKind, ServerConfig};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Query string of `GET /check-leak`.
#[derive(Debug, Deserialize)]
pub struct CheckLeakQuery {
    /// Identifier kind; defaults to `email`
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Identifier to look up
    pub value: Option<String>,
}

/// Body of `GET /breaches`.
#[derive(Debug, Serialize, Deserialize)]
pub struct BreachList {
    /// Catalogued breaches
    pub breaches: Vec<BreachRecord>,
}

/// Build the service router.
pub fn router(state: AppState, config: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(config.cors_max_age_secs));

    Router::new()
        .route("/check-leak", get(check_leak).fallback(method_not_allowed))
        .route("/breaches", get(list_breaches).fallback(method_not_allowed))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "ok"
}

async fn method_not_allowed() -> ApiError {
    ApiError::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

async fn check_leak(
    State(state): State<AppState>,
    Query(query): Query<CheckLeakQuery>,
) -> Result<Json<LeakResult>, ApiError> {
    let value = query.value.unwrap_or_default();
    if value.trim().is_empty() {
        return Err(ApiError::bad_request("Value parameter is required"));
    }

    let kind = match query.kind.as_deref() {
        None => QueryKind::default(),
        Some(kind) => kind.parse::<QueryKind>()?,
    };
    let identifier = Identifier::new(&value, kind)?;

    let result = state.db.lookup(identifier.kind(), identifier.value()).await?;
    tracing::debug!(
        "check-leak {}: {} ({} matches)",
        identifier.kind(),
        result.severity(),
        result.match_count()
    );
    Ok(Json(result))
}

async fn list_breaches(State(state): State<AppState>) -> Result<Json<BreachList>, ApiError> {
    let breaches = state.db.list_breaches().await?;
    Ok(Json(BreachList { breaches }))
}
