//! Reviews API module

mod handler;

use axum::{Router, routing::get, routing::post, routing::put};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reviews", review_routes())
}

fn review_routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create_review))
        .route("/approved", get(handler::list_approved))
        .route("/{id}/status", put(handler::update_status))
        .route("/{id}/helpful", put(handler::mark_helpful))
}
