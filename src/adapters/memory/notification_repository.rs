use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::Tables;
use crate::domain::foundation::{DomainError, ErrorCode, NotificationId, UserId};
use crate::domain::notification::Notification;
use crate::ports::NotificationRepository;

pub struct InMemoryNotificationRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryNotificationRepository {
    pub(crate) fn new(tables: Arc<RwLock<Tables>>) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn save(&self, notification: &Notification) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if !tables.users.iter().any(|u| u.id() == notification.user_id()) {
            return Err(DomainError::not_found(
                ErrorCode::UserNotFound,
                "User",
                notification.user_id(),
            ));
        }
        tables.notifications.push(notification.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &NotificationId,
    ) -> Result<Option<Notification>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.notifications.iter().find(|n| n.id() == id).cloned())
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Notification>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .notifications
            .iter()
            .rev()
            .filter(|n| n.user_id() == user_id)
            .cloned()
            .collect())
    }

    async fn count_unread(&self, user_id: &UserId) -> Result<u64, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .notifications
            .iter()
            .filter(|n| n.user_id() == user_id && !n.is_read())
            .count() as u64)
    }

    async fn mark_read(&self, id: &NotificationId) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let notification = tables
            .notifications
            .iter_mut()
            .find(|n| n.id() == id)
            .ok_or_else(|| {
                DomainError::not_found(ErrorCode::NotificationNotFound, "Notification", id)
            })?;
        notification.mark_read();
        Ok(())
    }

    async fn mark_all_read(&self, user_id: &UserId) -> Result<u64, DomainError> {
        let mut tables = self.tables.write().await;
        let mut flipped = 0;
        for notification in tables
            .notifications
            .iter_mut()
            .filter(|n| n.user_id() == user_id && !n.is_read())
        {
            notification.mark_read();
            flipped += 1;
        }
        Ok(flipped)
    }
}
