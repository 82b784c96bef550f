//! Order Repository (reads)
//!
//! Mutations live in the lifecycle manager (`crate::orders`) because they
//! span the orders and book tables inside one transaction.

use super::RepoResult;
use shared::models::{Order, OrderListQuery, Page};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

pub const COLUMNS: &str = "id, order_number, book_id, book_title, price_cents_at_order, \
     customer_name, email, phone, address, city, quantity, status, created_at, completed_at";

const DEFAULT_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 100;

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(&format!("SELECT {COLUMNS} FROM orders WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(order)
}

fn push_filters(builder: &mut QueryBuilder<'_, Sqlite>, query: &OrderListQuery) {
    if let Some(status) = query.status {
        builder.push(" AND status = ").push_bind(status.as_str());
    }
    if let Some(from) = query.date_from {
        builder.push(" AND created_at >= ").push_bind(from);
    }
    if let Some(to) = query.date_to {
        builder.push(" AND created_at <= ").push_bind(to);
    }
    if let Some(search) = &query.search
        && !search.trim().is_empty()
    {
        let pattern = format!("%{}%", search.trim());
        builder
            .push(" AND (customer_name LIKE ")
            .push_bind(pattern.clone())
            .push(" OR email LIKE ")
            .push_bind(pattern.clone())
            .push(" OR phone LIKE ")
            .push_bind(pattern.clone())
            .push(" OR order_number LIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

/// Filtered, paginated listing for the admin order table
pub async fn list(pool: &SqlitePool, query: &OrderListQuery) -> RepoResult<Page<Order>> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = (page - 1) * limit;

    let mut count_builder =
        QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM orders WHERE 1 = 1");
    push_filters(&mut count_builder, query);
    let total: i64 = count_builder.build_query_scalar().fetch_one(pool).await?;

    let mut builder = QueryBuilder::<Sqlite>::new(format!(
        "SELECT {COLUMNS} FROM orders WHERE 1 = 1"
    ));
    push_filters(&mut builder, query);
    builder
        .push(" ORDER BY created_at DESC LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);
    let items = builder.build_query_as::<Order>().fetch_all(pool).await?;

    Ok(Page::new(items, total, page, limit))
}
