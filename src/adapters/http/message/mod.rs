//! Conversation message endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::MessageResponse;
pub use routes::message_routes;
