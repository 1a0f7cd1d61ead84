//! Notification inbox endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::NotificationResponse;
pub use routes::notification_routes;
