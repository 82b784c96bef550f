//! Session Repository (refresh token entries)

use super::RepoResult;
use shared::models::Session;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, user_id, created_at, expires_at";

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Session>> {
    let session =
        sqlx::query_as::<_, Session>(&format!("SELECT {COLUMNS} FROM session WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(session)
}

pub async fn find_by_user(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<Session>> {
    let sessions = sqlx::query_as::<_, Session>(&format!(
        "SELECT {COLUMNS} FROM session WHERE user_id = ? ORDER BY created_at"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(sessions)
}

pub async fn create(
    pool: &SqlitePool,
    id: &str,
    user_id: i64,
    expires_at: i64,
) -> RepoResult<Session> {
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO session (id, user_id, created_at, expires_at) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(id)
    .bind(user_id)
    .bind(now)
    .bind(expires_at)
    .execute(pool)
    .await?;
    Ok(Session {
        id: id.to_string(),
        user_id,
        created_at: now,
        expires_at,
    })
}

/// Remove one session (logout); missing rows are a silent no-op
pub async fn delete(pool: &SqlitePool, id: &str) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM session WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Lazy cleanup: drop the user's expired sessions (run on login)
pub async fn purge_expired(pool: &SqlitePool, user_id: i64, now_ms: i64) -> RepoResult<u64> {
    let rows = sqlx::query("DELETE FROM session WHERE user_id = ? AND expires_at <= ?")
        .bind(user_id)
        .bind(now_ms)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected())
}
