//! Order lifecycle management
//!
//! Keeps `book.stock` consistent with the set of currently-completed orders.
//! Every mutation that touches both tables runs in one transaction, so the
//! status update and the stock adjustment either both land or both roll back.

use shared::models::{Order, OrderCreate, OrderStatus};
use shared::{AppError, AppResult, ErrorCode};
use sqlx::SqlitePool;
use validator::Validate;

use crate::db::repository::order::COLUMNS;

/// Create a new pending order against the active book.
///
/// The book's title and current price are snapshotted onto the order row.
/// The order number is derived from the assigned id and patched in a second
/// statement inside the same transaction.
pub async fn create_order(pool: &SqlitePool, data: OrderCreate) -> AppResult<Order> {
    data.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let book = crate::db::repository::book::find_by_title(pool, &data.book_title)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BookNotFound))?;
    if !book.is_active {
        return Err(AppError::new(ErrorCode::BookInactive));
    }

    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();

    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO orders (id, order_number, book_id, book_title, price_cents_at_order, \
         customer_name, email, phone, address, city, quantity, status, created_at, completed_at) \
         VALUES (?1, '', ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, 'pending', ?11, NULL)",
    )
    .bind(id)
    .bind(book.id)
    .bind(&book.title)
    .bind(book.price_cents)
    .bind(&data.customer_name)
    .bind(&data.email)
    .bind(&data.phone)
    .bind(&data.address)
    .bind(&data.city)
    .bind(data.quantity)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    // Derived from the assigned id, patched in the same transaction
    let order_number = format!("BK-{id}");
    sqlx::query("UPDATE orders SET order_number = ?1 WHERE id = ?2")
        .bind(&order_number)
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(
        order_id = id,
        order_number = %order_number,
        quantity = data.quantity,
        "Order created"
    );

    crate::db::repository::order::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::database("Failed to load created order"))
}

/// Transition an order between pending/completed/cancelled.
///
/// Stock adjustments attach only to edges touching `completed`:
/// - into `completed`: stock = MAX(stock - quantity, 0), overselling tolerated
/// - out of `completed`: stock = stock + quantity
/// - pending <-> cancelled: no stock change
///
/// Same-status transitions and unknown status strings are rejected with no
/// mutation.
pub async fn transition_status(pool: &SqlitePool, id: i64, target: &str) -> AppResult<Order> {
    let Some(target) = OrderStatus::parse(target) else {
        return Err(AppError::with_message(
            ErrorCode::InvalidStatusTransition,
            format!("Unknown order status: {target}"),
        ));
    };

    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    let order =
        sqlx::query_as::<_, Order>(&format!("SELECT {COLUMNS} FROM orders WHERE id = ?"))
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;

    if order.status == target {
        let code = if target == OrderStatus::Completed {
            ErrorCode::OrderAlreadyCompleted
        } else {
            ErrorCode::InvalidStatusTransition
        };
        return Err(AppError::with_message(
            code,
            format!("Order is already {}", target.as_str()),
        ));
    }

    if target == OrderStatus::Completed {
        // Floored at 0: overselling is tolerated rather than rejected
        sqlx::query(
            "UPDATE book SET stock = MAX(stock - ?1, 0), updated_at = ?2 WHERE id = ?3",
        )
        .bind(order.quantity)
        .bind(now)
        .bind(order.book_id)
        .execute(&mut *tx)
        .await?;
    } else if order.status == OrderStatus::Completed {
        sqlx::query("UPDATE book SET stock = stock + ?1, updated_at = ?2 WHERE id = ?3")
            .bind(order.quantity)
            .bind(now)
            .bind(order.book_id)
            .execute(&mut *tx)
            .await?;
    }

    let completed_at = if target == OrderStatus::Completed {
        Some(now)
    } else {
        None
    };
    sqlx::query("UPDATE orders SET status = ?1, completed_at = ?2 WHERE id = ?3")
        .bind(target.as_str())
        .bind(completed_at)
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(
        order_id = id,
        from = order.status.as_str(),
        to = target.as_str(),
        "Order status changed"
    );

    crate::db::repository::order::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))
}

/// Delete an order, restoring stock if it had been completed.
pub async fn delete_order(pool: &SqlitePool, id: i64) -> AppResult<()> {
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    let order =
        sqlx::query_as::<_, Order>(&format!("SELECT {COLUMNS} FROM orders WHERE id = ?"))
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;

    if order.status == OrderStatus::Completed {
        sqlx::query("UPDATE book SET stock = stock + ?1, updated_at = ?2 WHERE id = ?3")
            .bind(order.quantity)
            .bind(now)
            .bind(order.book_id)
            .execute(&mut *tx)
            .await?;
    }

    sqlx::query("DELETE FROM orders WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(
        order_id = id,
        status = order.status.as_str(),
        "Order deleted"
    );

    Ok(())
}
