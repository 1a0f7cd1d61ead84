//! HTTP routes for reviews.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{average_for_user, create_review, reviews_for_user};
use crate::adapters::http::state::AppState;

/// Routes mounted under `/api/reviews`.
pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_review))
        .route("/user/:id", get(reviews_for_user))
        .route("/user/:id/average", get(average_for_user))
}
