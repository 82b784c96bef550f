//! Notifications API module

mod handler;

use axum::{Router, routing::get, routing::put};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/notifications", notification_routes())
}

fn notification_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list_notifications))
        .route("/{id}/read", put(handler::mark_read))
        .route("/read-all", put(handler::mark_all_read))
}
