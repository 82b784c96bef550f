//! Health Handler

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::AppResult;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: i64,
}

/// GET /api/health (public) — liveness plus a database ping
pub async fn health(State(state): State<ServerState>) -> AppResult<Json<HealthStatus>> {
    sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(&state.pool)
        .await?;

    Ok(Json(HealthStatus {
        status: "ok",
        timestamp: shared::util::now_millis(),
    }))
}
