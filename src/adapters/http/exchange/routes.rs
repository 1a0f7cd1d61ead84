//! HTTP routes for exchange requests.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    accept, cancel, complete, create_exchange, get_exchange, received, refuse, sent,
};
use crate::adapters::http::state::AppState;

/// Routes mounted under `/api/exchanges`.
pub fn exchange_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_exchange))
        .route("/received", get(received))
        .route("/sent", get(sent))
        .route("/:id", get(get_exchange))
        .route("/:id/accept", put(accept))
        .route("/:id/refuse", put(refuse))
        .route("/:id/complete", put(complete))
        .route("/:id/cancel", put(cancel))
}
