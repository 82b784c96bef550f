//! Notification Handlers (admin inbox)

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::core::ServerState;
use crate::db::repository;
use crate::utils::AppResult;
use shared::models::Notification;

/// GET /api/notifications (admin) — unread first, then newest first
pub async fn list_notifications(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<Notification>>> {
    let notifications = repository::notification::find_all(&state.pool).await?;
    Ok(Json(notifications))
}

/// PUT /api/notifications/{id}/read (admin)
pub async fn mark_read(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Notification>> {
    let notification = repository::notification::mark_read(&state.pool, id).await?;
    Ok(Json(notification))
}

#[derive(Debug, Serialize)]
pub struct MarkAllResult {
    pub updated: u64,
}

/// PUT /api/notifications/read-all (admin)
pub async fn mark_all_read(
    State(state): State<ServerState>,
) -> AppResult<Json<MarkAllResult>> {
    let updated = repository::notification::mark_all_read(&state.pool).await?;
    Ok(Json(MarkAllResult { updated }))
}
