//! Order Handlers
//!
//! Creation is public (storefront checkout); everything else is admin-only.
//! Stock reconciliation happens inside the lifecycle manager, not here.

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::core::ServerState;
use crate::db::repository;
use crate::orders;
use crate::utils::{AppError, AppResult};
use shared::ErrorCode;
use shared::models::{
    NotificationKind, OrderCreate, OrderListQuery, OrderResponse, OrderStatusUpdate, Page,
};

/// POST /api/orders (public)
///
/// Places a pending order. The admin is notified through the inbox (failure
/// propagates) and by email (best-effort).
pub async fn create_order(
    State(state): State<ServerState>,
    Json(req): Json<OrderCreate>,
) -> AppResult<Json<OrderResponse>> {
    let order = orders::create_order(&state.pool, req).await?;

    let message = format!(
        "New order {} from {} ({} x {})",
        order.order_number, order.customer_name, order.quantity, order.book_title
    );
    repository::notification::create(&state.pool, NotificationKind::Order, &message, order.id)
        .await?;

    state.mailer.send_to_admin(
        format!("New order {}", order.order_number),
        format!(
            "{} ordered {} x {} for {} (total {}).\nShipping: {}, {}",
            order.customer_name,
            order.quantity,
            order.book_title,
            order.email,
            order.total_price(),
            order.address,
            order.city
        ),
    );

    Ok(Json(OrderResponse::from(order)))
}

/// GET /api/orders (admin)
pub async fn list_orders(
    State(state): State<ServerState>,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<Page<OrderResponse>>> {
    let page = repository::order::list(&state.pool, &query).await?;
    Ok(Json(page.map(OrderResponse::from)))
}

/// GET /api/orders/{id} (admin)
pub async fn get_order(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderResponse>> {
    let order = repository::order::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;
    Ok(Json(OrderResponse::from(order)))
}

/// PUT /api/orders/{id}/status (admin)
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(req): Json<OrderStatusUpdate>,
) -> AppResult<Json<OrderResponse>> {
    let order = orders::transition_status(&state.pool, id, &req.status).await?;
    Ok(Json(OrderResponse::from(order)))
}

/// DELETE /api/orders/{id} (admin)
pub async fn delete_order(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<()>> {
    orders::delete_order(&state.pool, id).await?;
    Ok(Json(()))
}
