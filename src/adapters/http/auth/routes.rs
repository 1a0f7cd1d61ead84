//! HTTP routes for authentication endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{get_profile, login, register, update_profile};
use crate::adapters::http::state::AppState;

/// Routes mounted under `/api/auth`.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/profile", get(get_profile).put(update_profile))
}
