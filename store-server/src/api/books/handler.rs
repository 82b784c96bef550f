//! Book Handlers
//!
//! The storefront sells a single active book. The public endpoint exposes
//! its title/price/stock; the admin endpoints adjust price and stock.

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::repository;
use crate::utils::{AppError, AppResult};
use shared::ErrorCode;
use shared::models::{Book, BookPriceUpdate, BookPublic, BookStockUpdate};

async fn active_book(state: &ServerState) -> AppResult<Book> {
    repository::book::find_active(&state.pool)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BookNotFound))
}

/// GET /api/books/price (public)
pub async fn get_price(State(state): State<ServerState>) -> AppResult<Json<BookPublic>> {
    let book = active_book(&state).await?;
    Ok(Json(BookPublic::from(&book)))
}

/// PUT /api/books/price (admin)
pub async fn update_price(
    State(state): State<ServerState>,
    Json(req): Json<BookPriceUpdate>,
) -> AppResult<Json<BookPublic>> {
    let cents = shared::util::decimal_to_cents(req.price)
        .filter(|c| *c > 0)
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::InvalidPrice,
                format!("Invalid price: {}", req.price),
            )
        })?;

    let book = active_book(&state).await?;
    let updated = repository::book::update_price(&state.pool, book.id, cents).await?;

    tracing::info!(
        book_id = book.id,
        old_cents = book.price_cents,
        new_cents = cents,
        "Book price updated"
    );

    Ok(Json(BookPublic::from(&updated)))
}

/// PUT /api/books/stock (admin)
pub async fn update_stock(
    State(state): State<ServerState>,
    Json(req): Json<BookStockUpdate>,
) -> AppResult<Json<BookPublic>> {
    if req.stock < 0 {
        return Err(AppError::with_message(
            ErrorCode::InvalidStock,
            format!("Invalid stock: {}", req.stock),
        ));
    }

    let book = active_book(&state).await?;
    let updated = repository::book::update_stock(&state.pool, book.id, req.stock).await?;

    tracing::info!(
        book_id = book.id,
        old_stock = book.stock,
        new_stock = req.stock,
        "Book stock updated"
    );

    Ok(Json(BookPublic::from(&updated)))
}
