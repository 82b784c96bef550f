//! Dashboard Handlers (admin aggregates)

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::OrderStatus;

/// Aggregate numbers for the admin dashboard
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_orders: i64,
    pub pending_orders: i64,
    pub completed_orders: i64,
    pub cancelled_orders: i64,
    /// Sum of quantity * snapshotted price over completed orders
    pub revenue: Decimal,
    pub total_reviews: i64,
    pub approved_reviews: i64,
    pub pending_reviews: i64,
    /// Average rating of approved reviews that carry one
    pub average_rating: Option<f64>,
    pub unread_notifications: i64,
    pub stock: i64,
}

/// GET /api/dashboard/stats (admin)
pub async fn get_stats(State(state): State<ServerState>) -> AppResult<Json<DashboardStats>> {
    let order_counts = sqlx::query_as::<_, (OrderStatus, i64)>(
        "SELECT status, COUNT(*) FROM orders GROUP BY status",
    )
    .fetch_all(&state.pool)
    .await?;

    let mut pending_orders = 0;
    let mut completed_orders = 0;
    let mut cancelled_orders = 0;
    for (status, count) in order_counts {
        match status {
            OrderStatus::Pending => pending_orders = count,
            OrderStatus::Completed => completed_orders = count,
            OrderStatus::Cancelled => cancelled_orders = count,
        }
    }

    let revenue_cents: i64 = sqlx::query_scalar(
        "SELECT COALESCE(SUM(quantity * price_cents_at_order), 0) \
         FROM orders WHERE status = 'completed'",
    )
    .fetch_one(&state.pool)
    .await?;

    let total_reviews: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM review")
        .fetch_one(&state.pool)
        .await?;
    let approved_reviews: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM review WHERE status = 'approved'")
            .fetch_one(&state.pool)
            .await?;
    let pending_reviews: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM review WHERE status = 'pending'")
            .fetch_one(&state.pool)
            .await?;
    let average_rating: Option<f64> = sqlx::query_scalar(
        "SELECT AVG(rating) FROM review WHERE status = 'approved' AND rating IS NOT NULL",
    )
    .fetch_one(&state.pool)
    .await?;

    let unread_notifications: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM notification WHERE is_read = 0")
            .fetch_one(&state.pool)
            .await?;

    let stock: i64 =
        sqlx::query_scalar("SELECT COALESCE(SUM(stock), 0) FROM book WHERE is_active = 1")
            .fetch_one(&state.pool)
            .await?;

    Ok(Json(DashboardStats {
        total_orders: pending_orders + completed_orders + cancelled_orders,
        pending_orders,
        completed_orders,
        cancelled_orders,
        revenue: Decimal::new(revenue_cents, 2),
        total_reviews,
        approved_reviews,
        pending_reviews,
        average_rating,
        unread_notifications,
        stock,
    }))
}
