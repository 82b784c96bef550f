//! User Repository (admin accounts)

use super::{RepoError, RepoResult};
use shared::models::User;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, email, password_hash, reset_token, reset_token_expires_at, created_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM user WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<User>> {
    let user =
        sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM user WHERE email = ? LIMIT 1"))
            .bind(email)
            .fetch_optional(pool)
            .await?;
    Ok(user)
}

pub async fn create(pool: &SqlitePool, email: &str, password_hash: &str) -> RepoResult<User> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO user (id, email, password_hash, created_at) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(id)
    .bind(email)
    .bind(password_hash)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepoError::Duplicate(format!("User {email} already exists"))
        }
        _ => RepoError::from(e),
    })?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

/// Store a single-use password reset token with its expiry
pub async fn set_reset_token(
    pool: &SqlitePool,
    user_id: i64,
    token: &str,
    expires_at: i64,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE user SET reset_token = ?1, reset_token_expires_at = ?2 WHERE id = ?3",
    )
    .bind(token)
    .bind(expires_at)
    .bind(user_id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("User {user_id} not found")));
    }
    Ok(())
}
