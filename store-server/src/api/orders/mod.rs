//! Orders API module

mod handler;

use axum::{Router, routing::get, routing::put};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", order_routes())
}

fn order_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list_orders).post(handler::create_order))
        .route("/{id}", get(handler::get_order).delete(handler::delete_order))
        .route("/{id}/status", put(handler::update_status))
}
