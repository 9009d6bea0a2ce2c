//! Operational routes: liveness, database readiness, build info.

use crate::error::AppError;
use crate::service::ShowService;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct OpsStatus {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
}

const BUILD: BuildInfo = BuildInfo {
    name: env!("CARGO_PKG_NAME"),
    version: env!("CARGO_PKG_VERSION"),
};

async fn live() -> Json<OpsStatus> {
    Json(OpsStatus {
        status: "ok",
        database: None,
    })
}

/// 503 through `AppError::Unavailable` when the pool cannot answer a trivial query.
async fn ready(State(state): State<AppState>) -> Result<Json<OpsStatus>, AppError> {
    ShowService::ping(&state.pool).await.map_err(|e| {
        tracing::warn!(error = %e, "readiness check failed");
        AppError::Unavailable("database unavailable".into())
    })?;
    Ok(Json(OpsStatus {
        status: "ok",
        database: Some("ok"),
    }))
}

async fn build_info() -> Json<&'static BuildInfo> {
    Json(&BUILD)
}

/// GET /health, GET /ready, GET /version.
pub fn ops_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(live))
        .route("/ready", get(ready))
        .route("/version", get(build_info))
        .with_state(state)
}
