//! Exchange request endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::ExchangeResponse;
pub use routes::exchange_routes;
