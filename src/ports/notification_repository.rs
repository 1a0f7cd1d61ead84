//! Notification repository port.
//!
//! Most notifications are written by the other repositories as part of the
//! event that caused them; `save` is for stand-alone notices.

use crate::domain::foundation::{DomainError, NotificationId, UserId};
use crate::domain::notification::Notification;
use async_trait::async_trait;

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// # Errors
    ///
    /// - `UserNotFound` if the addressee doesn't exist
    async fn save(&self, notification: &Notification) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &NotificationId)
        -> Result<Option<Notification>, DomainError>;

    /// Notifications of one user, newest first.
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Notification>, DomainError>;

    async fn count_unread(&self, user_id: &UserId) -> Result<u64, DomainError>;

    /// # Errors
    ///
    /// - `NotificationNotFound` if the notification doesn't exist
    async fn mark_read(&self, id: &NotificationId) -> Result<(), DomainError>;

    /// Flip every unread notification of the user. Returns how many flipped.
    async fn mark_all_read(&self, user_id: &UserId) -> Result<u64, DomainError>;
}
