//! Conversation read side: listing and read receipts.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, DomainError, ErrorCode, ExchangeId, MessageId};
use crate::domain::messaging::Message;
use crate::ports::{ExchangeRepository, MessageRepository};

pub struct GetConversationHandler {
    exchanges: Arc<dyn ExchangeRepository>,
    messages: Arc<dyn MessageRepository>,
}

impl GetConversationHandler {
    pub fn new(
        exchanges: Arc<dyn ExchangeRepository>,
        messages: Arc<dyn MessageRepository>,
    ) -> Self {
        Self {
            exchanges,
            messages,
        }
    }

    /// All messages of the exchange, oldest first, read or not.
    pub async fn handle(
        &self,
        exchange_id: &ExchangeId,
        metadata: CommandMetadata,
    ) -> Result<Vec<Message>, DomainError> {
        let exchange = self
            .exchanges
            .find_by_id(exchange_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(ErrorCode::ExchangeNotFound, "Exchange request", exchange_id)
            })?;
        exchange.ensure_participant(&metadata.user_id)?;

        self.messages.list_by_exchange(exchange_id).await
    }
}

#[derive(Debug, Clone)]
pub struct MarkMessageReadCommand {
    pub message_id: MessageId,
}

pub struct MarkMessageReadHandler {
    messages: Arc<dyn MessageRepository>,
}

impl MarkMessageReadHandler {
    pub fn new(messages: Arc<dyn MessageRepository>) -> Self {
        Self { messages }
    }

    pub async fn handle(
        &self,
        cmd: MarkMessageReadCommand,
        metadata: CommandMetadata,
    ) -> Result<(), DomainError> {
        let message = self
            .messages
            .find_by_id(&cmd.message_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(ErrorCode::MessageNotFound, "Message", cmd.message_id)
            })?;
        message.ensure_recipient(&metadata.user_id)?;

        if !message.is_read() {
            self.messages.mark_read(message.id()).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::messaging::{SendMessageCommand, SendMessageHandler};
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::foundation::ErrorKind;
    use crate::domain::user::User;

    async fn send(fx: &Fixture, exchange_id: ExchangeId, from: &User, text: &str) -> Message {
        SendMessageHandler::new(fx.users(), fx.exchanges(), fx.messages())
            .handle(
                SendMessageCommand {
                    exchange_id,
                    content: text.into(),
                },
                CommandMetadata::new(*from.id()),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn conversation_is_chronological_for_participants_only() {
        let fx = Fixture::new();
        let (exchange, ben, dora) = fx.pending_exchange().await;
        send(&fx, *exchange.id(), &ben, "first").await;
        send(&fx, *exchange.id(), &dora, "second").await;
        let handler = GetConversationHandler::new(fx.exchanges(), fx.messages());

        let thread = handler
            .handle(exchange.id(), CommandMetadata::new(*ben.id()))
            .await
            .unwrap();
        assert_eq!(
            thread.iter().map(|m| m.content()).collect::<Vec<_>>(),
            vec!["first", "second"]
        );

        let eve = fx.user("Eve").await;
        let err = handler
            .handle(exchange.id(), CommandMetadata::new(*eve.id()))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }

    #[tokio::test]
    async fn only_recipient_marks_read_and_it_is_idempotent() {
        let fx = Fixture::new();
        let (exchange, ben, dora) = fx.pending_exchange().await;
        let message = send(&fx, *exchange.id(), &ben, "hi").await;
        let handler = MarkMessageReadHandler::new(fx.messages());
        let cmd = MarkMessageReadCommand {
            message_id: *message.id(),
        };

        let err = handler
            .handle(cmd.clone(), CommandMetadata::new(*ben.id()))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);

        handler
            .handle(cmd.clone(), CommandMetadata::new(*dora.id()))
            .await
            .unwrap();
        handler
            .handle(cmd, CommandMetadata::new(*dora.id()))
            .await
            .unwrap();
        let stored = fx.messages().find_by_id(message.id()).await.unwrap().unwrap();
        assert!(stored.is_read());
    }
}
