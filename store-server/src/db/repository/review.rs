//! Review Repository

use super::{RepoError, RepoResult};
use shared::models::{Page, Review, ReviewCreate, ReviewStatus};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, is_anonymous, rating, comment, status, helpful_count, created_at";

const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 50;

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Review>> {
    let review = sqlx::query_as::<_, Review>(&format!("SELECT {COLUMNS} FROM review WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(review)
}

pub async fn create(pool: &SqlitePool, data: ReviewCreate) -> RepoResult<Review> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO review (id, name, is_anonymous, rating, comment, status, helpful_count, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, 'pending', 0, ?6)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(data.is_anonymous)
    .bind(data.rating)
    .bind(&data.comment)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create review".into()))
}

/// Approved reviews, newest first (public listing)
pub async fn list_approved(pool: &SqlitePool, page: i64, limit: i64) -> RepoResult<Page<Review>> {
    let page = page.max(1);
    let limit = limit.clamp(1, MAX_LIMIT);
    let offset = (page - 1) * limit;

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM review WHERE status = 'approved'")
        .fetch_one(pool)
        .await?;

    let items = sqlx::query_as::<_, Review>(&format!(
        "SELECT {COLUMNS} FROM review WHERE status = 'approved' \
         ORDER BY created_at DESC LIMIT ? OFFSET ?"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(Page::new(items, total, page, limit))
}

pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    status: ReviewStatus,
) -> RepoResult<Review> {
    let rows = sqlx::query("UPDATE review SET status = ?1 WHERE id = ?2")
        .bind(status.as_str())
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Review {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Review {id} not found")))
}

pub async fn increment_helpful(pool: &SqlitePool, id: i64) -> RepoResult<Review> {
    let rows = sqlx::query("UPDATE review SET helpful_count = helpful_count + 1 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Review {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Review {id} not found")))
}

pub fn default_limit() -> i64 {
    DEFAULT_LIMIT
}
