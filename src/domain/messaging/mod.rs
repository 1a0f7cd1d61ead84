//! Messaging module - conversation threads attached to an exchange request.

mod message;

pub use message::{Message, MAX_CONTENT_LENGTH};
