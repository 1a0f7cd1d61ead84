//! Image upload and download endpoints.

mod handlers;
mod routes;

pub use handlers::{content_type_for, FILES_URL_PREFIX};
pub use routes::upload_routes;
