//! HTTP DTOs for conversation messages.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ExchangeId, MessageId, Timestamp, UserId};
use crate::domain::messaging::Message;

#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    pub exchange_id: ExchangeId,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: MessageId,
    pub exchange_id: ExchangeId,
    pub sender_id: UserId,
    pub recipient_id: UserId,
    pub content: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}

impl From<&Message> for MessageResponse {
    fn from(message: &Message) -> Self {
        Self {
            id: *message.id(),
            exchange_id: *message.exchange_id(),
            sender_id: *message.sender_id(),
            recipient_id: *message.recipient_id(),
            content: message.content().to_string(),
            is_read: message.is_read(),
            created_at: *message.created_at(),
        }
    }
}
