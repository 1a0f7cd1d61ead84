//! HTTP routes for uploads.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use super::handlers::{serve_file, upload};
use crate::adapters::http::state::AppState;

/// Routes mounted under `/api/uploads`.
///
/// The upload route takes the configured body limit instead of axum's default.
pub fn upload_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(upload).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/files/:name", get(serve_file))
}
