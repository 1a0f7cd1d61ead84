//! Notification handlers.
//!
//! Event-driven notifications are written by the exchange, messaging and
//! review handlers inside their own repository call. The handlers here
//! cover stand-alone notices and the recipient's inbox operations.

use std::sync::Arc;

use crate::domain::foundation::{
    CommandMetadata, DomainError, ErrorCode, ExchangeId, NotificationId, UserId,
};
use crate::domain::listing::ListingRef;
use crate::domain::notification::{Notification, NotificationKind};
use crate::ports::NotificationRepository;

/// Command to post a notice to any existing user.
#[derive(Debug, Clone)]
pub struct CreateNotificationCommand {
    pub user_id: UserId,
    pub kind: NotificationKind,
    pub message: String,
    pub exchange_id: Option<ExchangeId>,
    pub listing: Option<ListingRef>,
}

pub struct CreateNotificationHandler {
    notifications: Arc<dyn NotificationRepository>,
}

impl CreateNotificationHandler {
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }

    /// Fails with `UserNotFound` if the addressee doesn't exist.
    pub async fn handle(
        &self,
        cmd: CreateNotificationCommand,
    ) -> Result<Notification, DomainError> {
        let notification = Notification::new(
            cmd.user_id,
            cmd.kind,
            cmd.message,
            cmd.exchange_id,
            cmd.listing,
        );
        self.notifications.save(&notification).await?;
        Ok(notification)
    }
}

/// Inbox of the calling user.
pub struct NotificationInboxHandler {
    notifications: Arc<dyn NotificationRepository>,
}

impl NotificationInboxHandler {
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }

    /// Newest first.
    pub async fn list(&self, metadata: CommandMetadata) -> Result<Vec<Notification>, DomainError> {
        self.notifications.list_by_user(&metadata.user_id).await
    }

    pub async fn unread_count(&self, metadata: CommandMetadata) -> Result<u64, DomainError> {
        self.notifications.count_unread(&metadata.user_id).await
    }

    /// # Errors
    ///
    /// - `NotificationNotFound` if missing
    /// - `Forbidden` if it belongs to someone else
    pub async fn mark_read(
        &self,
        id: &NotificationId,
        metadata: CommandMetadata,
    ) -> Result<(), DomainError> {
        let notification = self
            .notifications
            .find_by_id(id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(ErrorCode::NotificationNotFound, "Notification", id)
            })?;
        notification.ensure_owner(&metadata.user_id)?;
        self.notifications.mark_read(id).await
    }

    /// Returns how many notifications were flipped.
    pub async fn mark_all_read(&self, metadata: CommandMetadata) -> Result<u64, DomainError> {
        let flipped = self.notifications.mark_all_read(&metadata.user_id).await?;
        tracing::debug!(user_id = %metadata.user_id, flipped, "Notifications marked read");
        Ok(flipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::foundation::ErrorKind;

    fn notice(user_id: UserId, text: &str) -> CreateNotificationCommand {
        CreateNotificationCommand {
            user_id,
            kind: NotificationKind::NewMessage,
            message: text.to_string(),
            exchange_id: None,
            listing: None,
        }
    }

    #[tokio::test]
    async fn create_requires_existing_user() {
        let fx = Fixture::new();
        let err = CreateNotificationHandler::new(fx.notifications())
            .handle(notice(UserId::new(), "hello"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn inbox_counts_and_marks() {
        let fx = Fixture::new();
        let ann = fx.user("Ann").await;
        let create = CreateNotificationHandler::new(fx.notifications());
        let first = create.handle(notice(*ann.id(), "one")).await.unwrap();
        create.handle(notice(*ann.id(), "two")).await.unwrap();
        create.handle(notice(*ann.id(), "three")).await.unwrap();
        let inbox = NotificationInboxHandler::new(fx.notifications());
        let me = CommandMetadata::new(*ann.id());

        let listed = inbox.list(me.clone()).await.unwrap();
        assert_eq!(listed[0].message(), "three");
        assert_eq!(inbox.unread_count(me.clone()).await.unwrap(), 3);

        inbox.mark_read(first.id(), me.clone()).await.unwrap();
        assert_eq!(inbox.unread_count(me.clone()).await.unwrap(), 2);

        assert_eq!(inbox.mark_all_read(me.clone()).await.unwrap(), 2);
        assert_eq!(inbox.unread_count(me).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn mark_read_checks_owner_and_existence() {
        let fx = Fixture::new();
        let ann = fx.user("Ann").await;
        let bob = fx.user("Bob").await;
        let n = CreateNotificationHandler::new(fx.notifications())
            .handle(notice(*ann.id(), "private"))
            .await
            .unwrap();
        let inbox = NotificationInboxHandler::new(fx.notifications());

        let err = inbox
            .mark_read(n.id(), CommandMetadata::new(*bob.id()))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);

        let err = inbox
            .mark_read(&NotificationId::new(), CommandMetadata::new(*ann.id()))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
