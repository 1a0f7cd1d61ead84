//! Registration, login and profile endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{LoginResponse, ProfileResponse, UserResponse};
pub use routes::auth_routes;
