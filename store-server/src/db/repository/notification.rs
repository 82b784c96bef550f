//! Notification Repository

use super::{RepoError, RepoResult};
use shared::models::{Notification, NotificationKind};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, kind, message, is_read, related_id, created_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Notification>> {
    let notification = sqlx::query_as::<_, Notification>(&format!(
        "SELECT {COLUMNS} FROM notification WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(notification)
}

pub async fn create(
    pool: &SqlitePool,
    kind: NotificationKind,
    message: &str,
    related_id: i64,
) -> RepoResult<Notification> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    let kind_str = match kind {
        NotificationKind::Order => "order",
        NotificationKind::Review => "review",
    };
    sqlx::query(
        "INSERT INTO notification (id, kind, message, is_read, related_id, created_at) \
         VALUES (?1, ?2, ?3, 0, ?4, ?5)",
    )
    .bind(id)
    .bind(kind_str)
    .bind(message)
    .bind(related_id)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create notification".into()))
}

/// All notifications, unread first, then newest first
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Notification>> {
    let notifications = sqlx::query_as::<_, Notification>(&format!(
        "SELECT {COLUMNS} FROM notification ORDER BY is_read ASC, created_at DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(notifications)
}

pub async fn mark_read(pool: &SqlitePool, id: i64) -> RepoResult<Notification> {
    let rows = sqlx::query("UPDATE notification SET is_read = 1 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Notification {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Notification {id} not found")))
}

pub async fn mark_all_read(pool: &SqlitePool) -> RepoResult<u64> {
    let rows = sqlx::query("UPDATE notification SET is_read = 1 WHERE is_read = 0")
        .execute(pool)
        .await?;
    Ok(rows.rows_affected())
}
