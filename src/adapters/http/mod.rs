//! HTTP adapter - REST API over axum.
//!
//! Each resource has its own module with `dto`, `handlers` and `routes`.
//! Handlers are thin: they map DTOs to commands, build the application
//! handler from [`AppState`] and map `DomainError` to a response through
//! [`ApiError`].

pub mod auth;
pub mod error;
pub mod exchange;
pub mod listing;
pub mod message;
pub mod middleware;
pub mod notification;
pub mod review;
mod router;
mod state;
pub mod upload;

pub use error::{ApiError, ErrorResponse};
pub use router::api_router;
pub use state::AppState;
