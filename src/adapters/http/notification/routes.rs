//! HTTP routes for the notification inbox.

use axum::{
    routing::{get, put},
    Router,
};

use super::handlers::{list, mark_all_read, mark_read, unread_count};
use crate::adapters::http::state::AppState;

/// Routes mounted under `/api/notifications`.
pub fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/unread-count", get(unread_count))
        .route("/read-all", put(mark_all_read))
        .route("/:id/read", put(mark_read))
}
