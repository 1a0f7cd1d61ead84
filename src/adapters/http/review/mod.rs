//! Review endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::ReviewResponse;
pub use routes::review_routes;
