//! Books API module

mod handler;

use axum::{Router, routing::get, routing::put};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/books", book_routes())
}

fn book_routes() -> Router<ServerState> {
    Router::new()
        .route("/price", get(handler::get_price).put(handler::update_price))
        .route("/stock", put(handler::update_stock))
}
