//! Notification aggregate.
//!
//! Notifications are written in the same transaction as the event they
//! describe. They carry optional deep-link ids so a client can jump to the
//! exchange or listing; those links are cleared when the target is deleted.

use crate::domain::exchange::ExchangeRequest;
use crate::domain::foundation::{
    DomainError, ErrorCode, ExchangeId, NotificationId, Timestamp, UserId,
};
use crate::domain::listing::ListingRef;

use super::NotificationKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    id: NotificationId,
    user_id: UserId,
    kind: NotificationKind,
    message: String,
    read: bool,
    exchange_id: Option<ExchangeId>,
    listing: Option<ListingRef>,
    created_at: Timestamp,
}

impl Notification {
    /// Creates an unread notification. No business validation is applied.
    pub fn new(
        user_id: UserId,
        kind: NotificationKind,
        message: impl Into<String>,
        exchange_id: Option<ExchangeId>,
        listing: Option<ListingRef>,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            user_id,
            kind,
            message: message.into(),
            read: false,
            exchange_id,
            listing,
            created_at: Timestamp::now(),
        }
    }

    /// Tells the donor that someone wants their listing.
    pub fn exchange_requested(exchange: &ExchangeRequest, beneficiary_name: &str) -> Self {
        Self::new(
            *exchange.donor_id(),
            NotificationKind::NewRequest,
            format!("{} wants to exchange with you", beneficiary_name),
            Some(*exchange.id()),
            Some(*exchange.listing()),
        )
    }

    /// Tells the beneficiary the donor said yes.
    pub fn exchange_accepted(exchange: &ExchangeRequest, donor_name: &str) -> Self {
        Self::new(
            *exchange.beneficiary_id(),
            NotificationKind::RequestAccepted,
            format!("{} accepted your exchange request", donor_name),
            Some(*exchange.id()),
            Some(*exchange.listing()),
        )
    }

    /// Tells the beneficiary the donor said no.
    pub fn exchange_refused(exchange: &ExchangeRequest, donor_name: &str) -> Self {
        Self::new(
            *exchange.beneficiary_id(),
            NotificationKind::RequestRefused,
            format!("{} refused your exchange request", donor_name),
            Some(*exchange.id()),
            Some(*exchange.listing()),
        )
    }

    pub fn message_received(recipient: UserId, exchange_id: ExchangeId, sender_name: &str) -> Self {
        Self::new(
            recipient,
            NotificationKind::NewMessage,
            format!("New message from {}", sender_name),
            Some(exchange_id),
            None,
        )
    }

    pub fn review_received(reviewee: UserId, exchange_id: ExchangeId, reviewer_name: &str) -> Self {
        Self::new(
            reviewee,
            NotificationKind::ReviewReceived,
            format!("{} left a review on your profile", reviewer_name),
            Some(exchange_id),
            None,
        )
    }

    /// Reconstitute from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: NotificationId,
        user_id: UserId,
        kind: NotificationKind,
        message: String,
        read: bool,
        exchange_id: Option<ExchangeId>,
        listing: Option<ListingRef>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            kind,
            message,
            read,
            exchange_id,
            listing,
            created_at,
        }
    }

    pub fn id(&self) -> &NotificationId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_read(&self) -> bool {
        self.read
    }

    pub fn exchange_id(&self) -> Option<&ExchangeId> {
        self.exchange_id.as_ref()
    }

    pub fn listing(&self) -> Option<&ListingRef> {
        self.listing.as_ref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn ensure_owner(&self, user_id: &UserId) -> Result<(), DomainError> {
        if &self.user_id == user_id {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "This notification belongs to another user",
            )
            .with_detail("notification_id", self.id.to_string()))
        }
    }

    pub fn mark_read(&mut self) {
        self.read = true;
    }

    /// Drops deep links to an exchange or listing that no longer exists.
    pub fn clear_links(&mut self) {
        self.exchange_id = None;
        self.listing = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::exchange::ExchangeProposal;
    use crate::domain::foundation::SkillListingId;
    use chrono::{Duration, Utc};

    fn exchange() -> ExchangeRequest {
        let today = Utc::now().date_naive();
        ExchangeRequest::create(
            ListingRef::Skill(SkillListingId::new()),
            UserId::new(),
            UserId::new(),
            ExchangeProposal {
                offer: "Two hours of gardening".to_string(),
                exchange_date: today + Duration::days(2),
                initial_message: None,
            },
            today,
        )
        .unwrap()
    }

    #[test]
    fn new_request_goes_to_donor_with_links() {
        let exchange = exchange();
        let n = Notification::exchange_requested(&exchange, "Alice");
        assert_eq!(n.user_id(), exchange.donor_id());
        assert_eq!(n.kind(), NotificationKind::NewRequest);
        assert_eq!(n.message(), "Alice wants to exchange with you");
        assert_eq!(n.exchange_id(), Some(exchange.id()));
        assert_eq!(n.listing(), Some(exchange.listing()));
        assert!(!n.is_read());
    }

    #[test]
    fn decisions_go_to_beneficiary() {
        let exchange = exchange();
        let accepted = Notification::exchange_accepted(&exchange, "Bob");
        let refused = Notification::exchange_refused(&exchange, "Bob");
        assert_eq!(accepted.user_id(), exchange.beneficiary_id());
        assert_eq!(refused.kind(), NotificationKind::RequestRefused);
    }

    #[test]
    fn owner_check_and_link_clearing() {
        let exchange = exchange();
        let mut n = Notification::exchange_requested(&exchange, "Alice");
        assert!(n.ensure_owner(exchange.beneficiary_id()).is_err());
        assert!(n.ensure_owner(exchange.donor_id()).is_ok());

        n.clear_links();
        assert!(n.exchange_id().is_none());
        assert!(n.listing().is_none());
    }
}
