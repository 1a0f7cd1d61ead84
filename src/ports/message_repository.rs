//! Message repository port.

use crate::domain::foundation::{DomainError, ExchangeId, MessageId};
use crate::domain::messaging::Message;
use crate::domain::notification::Notification;
use async_trait::async_trait;

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Insert a message and the recipient's notification atomically.
    async fn send(&self, message: &Message, notification: &Notification)
        -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &MessageId) -> Result<Option<Message>, DomainError>;

    /// Messages of one exchange, oldest first.
    async fn list_by_exchange(&self, exchange_id: &ExchangeId)
        -> Result<Vec<Message>, DomainError>;

    /// Flag a message as read. Idempotent.
    ///
    /// # Errors
    ///
    /// - `MessageNotFound` if the message doesn't exist
    async fn mark_read(&self, id: &MessageId) -> Result<(), DomainError>;
}
