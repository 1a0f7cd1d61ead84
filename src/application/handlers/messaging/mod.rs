//! Messaging handlers.

mod conversation;
mod send_message;

pub use conversation::{GetConversationHandler, MarkMessageReadCommand, MarkMessageReadHandler};
pub use send_message::{SendMessageCommand, SendMessageHandler};
