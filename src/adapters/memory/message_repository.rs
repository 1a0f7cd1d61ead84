use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::Tables;
use crate::domain::foundation::{DomainError, ErrorCode, ExchangeId, MessageId};
use crate::domain::messaging::Message;
use crate::domain::notification::Notification;
use crate::ports::MessageRepository;

pub struct InMemoryMessageRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryMessageRepository {
    pub(crate) fn new(tables: Arc<RwLock<Tables>>) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn send(
        &self,
        message: &Message,
        notification: &Notification,
    ) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if !tables.exchanges.iter().any(|e| e.id() == message.exchange_id()) {
            return Err(DomainError::not_found(
                ErrorCode::ExchangeNotFound,
                "Exchange request",
                message.exchange_id(),
            ));
        }
        tables.messages.push(message.clone());
        tables.notifications.push(notification.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &MessageId) -> Result<Option<Message>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.messages.iter().find(|m| m.id() == id).cloned())
    }

    async fn list_by_exchange(
        &self,
        exchange_id: &ExchangeId,
    ) -> Result<Vec<Message>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .messages
            .iter()
            .filter(|m| m.exchange_id() == exchange_id)
            .cloned()
            .collect())
    }

    async fn mark_read(&self, id: &MessageId) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let message = tables
            .messages
            .iter_mut()
            .find(|m| m.id() == id)
            .ok_or_else(|| DomainError::not_found(ErrorCode::MessageNotFound, "Message", id))?;
        message.mark_read();
        Ok(())
    }
}
