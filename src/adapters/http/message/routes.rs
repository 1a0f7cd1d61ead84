//! HTTP routes for conversation messages.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{conversation, mark_read, send_message};
use crate::adapters::http::state::AppState;

/// Routes mounted under `/api/messages`.
pub fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(send_message))
        .route("/conversation/:exchange_id", get(conversation))
        .route("/:id/read", put(mark_read))
}
