//! Book Repository

use super::{RepoError, RepoResult};
use shared::models::Book;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, title, price_cents, is_active, stock, created_at, updated_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Book>> {
    let book = sqlx::query_as::<_, Book>(&format!("SELECT {COLUMNS} FROM book WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(book)
}

pub async fn find_by_title(pool: &SqlitePool, title: &str) -> RepoResult<Option<Book>> {
    let book =
        sqlx::query_as::<_, Book>(&format!("SELECT {COLUMNS} FROM book WHERE title = ? LIMIT 1"))
            .bind(title)
            .fetch_optional(pool)
            .await?;
    Ok(book)
}

/// The single active book (storefront price endpoint)
pub async fn find_active(pool: &SqlitePool) -> RepoResult<Option<Book>> {
    let book = sqlx::query_as::<_, Book>(&format!(
        "SELECT {COLUMNS} FROM book WHERE is_active = 1 LIMIT 1"
    ))
    .fetch_optional(pool)
    .await?;
    Ok(book)
}

pub async fn update_price(pool: &SqlitePool, id: i64, price_cents: i64) -> RepoResult<Book> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE book SET price_cents = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(price_cents)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Book {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Book {id} not found")))
}

pub async fn update_stock(pool: &SqlitePool, id: i64, stock: i64) -> RepoResult<Book> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE book SET stock = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(stock)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Book {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Book {id} not found")))
}
