//! PostgreSQL implementation of MessageRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use uuid::Uuid;

use super::support::{
    column, db_error, insert_notification, is_foreign_key_violation, timestamp, user_id,
};
use crate::domain::foundation::{DomainError, ErrorCode, ExchangeId, MessageId};
use crate::domain::messaging::Message;
use crate::domain::notification::Notification;
use crate::ports::MessageRepository;

const MESSAGE_COLUMNS: &str =
    "id, exchange_id, sender_id, recipient_id, content, is_read, created_at";

#[derive(Clone)]
pub struct PostgresMessageRepository {
    pool: PgPool,
}

impl PostgresMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PostgresMessageRepository {
    async fn send(
        &self,
        message: &Message,
        notification: &Notification,
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to start transaction", e))?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO messages (
                id, exchange_id, sender_id, recipient_id, content, is_read, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(message.id().as_uuid())
        .bind(message.exchange_id().as_uuid())
        .bind(message.sender_id().as_uuid())
        .bind(message.recipient_id().as_uuid())
        .bind(message.content())
        .bind(message.is_read())
        .bind(message.created_at().as_datetime())
        .execute(&mut *tx)
        .await;

        match inserted {
            Ok(_) => {}
            Err(e) if is_foreign_key_violation(&e) => {
                return Err(DomainError::not_found(
                    ErrorCode::ExchangeNotFound,
                    "Exchange request",
                    message.exchange_id(),
                ));
            }
            Err(e) => return Err(db_error("Failed to insert message", e)),
        }

        insert_notification(&mut tx, notification).await?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit transaction", e))?;
        Ok(())
    }

    async fn find_by_id(&self, id: &MessageId) -> Result<Option<Message>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM messages WHERE id = $1",
            MESSAGE_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch message", e))?;

        row.map(row_to_message).transpose()
    }

    async fn list_by_exchange(
        &self,
        exchange_id: &ExchangeId,
    ) -> Result<Vec<Message>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM messages WHERE exchange_id = $1 ORDER BY created_at ASC",
            MESSAGE_COLUMNS
        ))
        .bind(exchange_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch conversation", e))?;

        rows.into_iter().map(row_to_message).collect()
    }

    async fn mark_read(&self, id: &MessageId) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE messages SET is_read = TRUE WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to mark message read", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(
                ErrorCode::MessageNotFound,
                "Message",
                id,
            ));
        }
        Ok(())
    }
}

fn row_to_message(row: PgRow) -> Result<Message, DomainError> {
    let id: Uuid = column(&row, "id")?;
    let exchange_id: Uuid = column(&row, "exchange_id")?;

    Ok(Message::reconstitute(
        MessageId::from_uuid(id),
        ExchangeId::from_uuid(exchange_id),
        user_id(&row, "sender_id")?,
        user_id(&row, "recipient_id")?,
        column(&row, "content")?,
        column(&row, "is_read")?,
        timestamp(&row, "created_at")?,
    ))
}
