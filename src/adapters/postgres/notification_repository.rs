//! PostgreSQL implementation of NotificationRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use super::support::{db_error, insert_notification, row_to_notification};
use crate::domain::foundation::{DomainError, ErrorCode, NotificationId, UserId};
use crate::domain::notification::Notification;
use crate::ports::NotificationRepository;

const NOTIFICATION_COLUMNS: &str = "id, user_id, kind, message, is_read, exchange_id, \
                                    item_listing_id, skill_listing_id, created_at";

#[derive(Clone)]
pub struct PostgresNotificationRepository {
    pool: PgPool,
}

impl PostgresNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PostgresNotificationRepository {
    async fn save(&self, notification: &Notification) -> Result<(), DomainError> {
        let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(notification.user_id().as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to check user", e))?;
        if !exists.0 {
            return Err(DomainError::not_found(
                ErrorCode::UserNotFound,
                "User",
                notification.user_id(),
            ));
        }

        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| db_error("Failed to acquire connection", e))?;
        insert_notification(&mut conn, notification).await
    }

    async fn find_by_id(
        &self,
        id: &NotificationId,
    ) -> Result<Option<Notification>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM notifications WHERE id = $1",
            NOTIFICATION_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch notification", e))?;

        row.map(row_to_notification).transpose()
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Notification>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM notifications WHERE user_id = $1 ORDER BY created_at DESC",
            NOTIFICATION_COLUMNS
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch notifications", e))?;

        rows.into_iter().map(row_to_notification).collect()
    }

    async fn count_unread(&self, user_id: &UserId) -> Result<u64, DomainError> {
        let result: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND NOT is_read",
        )
        .bind(user_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to count unread notifications", e))?;

        Ok(result.0 as u64)
    }

    async fn mark_read(&self, id: &NotificationId) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE notifications SET is_read = TRUE WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to mark notification read", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(
                ErrorCode::NotificationNotFound,
                "Notification",
                id,
            ));
        }
        Ok(())
    }

    async fn mark_all_read(&self, user_id: &UserId) -> Result<u64, DomainError> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE WHERE user_id = $1 AND NOT is_read",
        )
        .bind(user_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to mark notifications read", e))?;

        Ok(result.rows_affected())
    }
}
