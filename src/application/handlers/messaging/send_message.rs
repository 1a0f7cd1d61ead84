//! SendMessageHandler - posts a message on an exchange conversation.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, DomainError, ErrorCode, ExchangeId};
use crate::domain::messaging::Message;
use crate::domain::notification::Notification;
use crate::ports::{ExchangeRepository, MessageRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    pub exchange_id: ExchangeId,
    pub content: String,
}

pub struct SendMessageHandler {
    users: Arc<dyn UserRepository>,
    exchanges: Arc<dyn ExchangeRepository>,
    messages: Arc<dyn MessageRepository>,
}

impl SendMessageHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        exchanges: Arc<dyn ExchangeRepository>,
        messages: Arc<dyn MessageRepository>,
    ) -> Self {
        Self {
            users,
            exchanges,
            messages,
        }
    }

    pub async fn handle(
        &self,
        cmd: SendMessageCommand,
        metadata: CommandMetadata,
    ) -> Result<Message, DomainError> {
        let exchange = self
            .exchanges
            .find_by_id(&cmd.exchange_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(
                    ErrorCode::ExchangeNotFound,
                    "Exchange request",
                    cmd.exchange_id,
                )
            })?;

        let message = Message::compose(&exchange, metadata.user_id, cmd.content)?;

        let sender = self
            .users
            .find_by_id(&metadata.user_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(ErrorCode::UserNotFound, "User", metadata.user_id)
            })?;
        let notification = Notification::message_received(
            *message.recipient_id(),
            *exchange.id(),
            sender.name(),
        );

        self.messages.send(&message, &notification).await?;

        tracing::info!(
            message_id = %message.id(),
            exchange_id = %exchange.id(),
            sender_id = %message.sender_id(),
            "Message sent"
        );
        Ok(message)
    }
}
