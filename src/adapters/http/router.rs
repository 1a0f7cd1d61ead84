//! Assembles the `/api` router.

use axum::{middleware, Router};

use super::auth::auth_routes;
use super::exchange::exchange_routes;
use super::listing::{item_routes, skill_routes};
use super::message::message_routes;
use super::middleware::{auth_middleware, AuthState};
use super::notification::notification_routes;
use super::review::review_routes;
use super::state::AppState;
use super::upload::upload_routes;

/// Every endpoint under `/api`, with bearer-token resolution applied.
///
/// Cross-cutting layers (tracing, CORS, timeouts, request ids) are added
/// by the binary.
pub fn api_router(state: AppState) -> Router {
    let validator: AuthState = state.session_validator.clone();

    let api = Router::new()
        .nest("/auth", auth_routes())
        .nest("/items", item_routes())
        .nest("/skills", skill_routes())
        .nest("/exchanges", exchange_routes())
        .nest("/messages", message_routes())
        .nest("/notifications", notification_routes())
        .nest("/reviews", review_routes())
        .nest("/uploads", upload_routes(state.max_upload_bytes));

    Router::new()
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(validator, auth_middleware))
        .with_state(state)
}
