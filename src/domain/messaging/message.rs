use crate::domain::exchange::ExchangeRequest;
use crate::domain::foundation::{
    check_required, DomainError, ErrorCode, ExchangeId, MessageId, Timestamp, UserId,
};

pub const MAX_CONTENT_LENGTH: usize = 2000;

/// A message exchanged between the two parties of an exchange request.
///
/// The recipient is always the counterpart of the sender on the exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    id: MessageId,
    exchange_id: ExchangeId,
    sender_id: UserId,
    recipient_id: UserId,
    content: String,
    read: bool,
    created_at: Timestamp,
}

impl Message {
    /// Writes a new unread message from `sender_id` on `exchange`.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the sender is not a participant
    /// - `EmptyField` / `InvalidFormat` for blank or overlong content
    pub fn compose(
        exchange: &ExchangeRequest,
        sender_id: UserId,
        content: String,
    ) -> Result<Self, DomainError> {
        let recipient_id = exchange.counterpart_of(&sender_id).ok_or_else(|| {
            DomainError::new(
                ErrorCode::Forbidden,
                "Only the participants of this exchange can send messages",
            )
            .with_detail("exchange_id", exchange.id().to_string())
        })?;
        check_required("content", &content, MAX_CONTENT_LENGTH)?;

        Ok(Self {
            id: MessageId::new(),
            exchange_id: *exchange.id(),
            sender_id,
            recipient_id,
            content,
            read: false,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitute from persistence (no validation).
    pub fn reconstitute(
        id: MessageId,
        exchange_id: ExchangeId,
        sender_id: UserId,
        recipient_id: UserId,
        content: String,
        read: bool,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            exchange_id,
            sender_id,
            recipient_id,
            content,
            read,
            created_at,
        }
    }

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn exchange_id(&self) -> &ExchangeId {
        &self.exchange_id
    }

    pub fn sender_id(&self) -> &UserId {
        &self.sender_id
    }

    pub fn recipient_id(&self) -> &UserId {
        &self.recipient_id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_read(&self) -> bool {
        self.read
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Recipient-only check used before marking as read.
    pub fn ensure_recipient(&self, user_id: &UserId) -> Result<(), DomainError> {
        if &self.recipient_id == user_id {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "Only the recipient can mark this message as read",
            )
            .with_detail("message_id", self.id.to_string()))
        }
    }

    /// Idempotent.
    pub fn mark_read(&mut self) {
        self.read = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::exchange::ExchangeProposal;
    use crate::domain::foundation::{ErrorKind, ItemListingId};
    use crate::domain::listing::ListingRef;
    use chrono::{Duration, Utc};

    fn exchange() -> (ExchangeRequest, UserId, UserId) {
        let beneficiary = UserId::new();
        let donor = UserId::new();
        let today = Utc::now().date_naive();
        let exchange = ExchangeRequest::create(
            ListingRef::Item(ItemListingId::new()),
            beneficiary,
            donor,
            ExchangeProposal {
                offer: "Bread".to_string(),
                exchange_date: today + Duration::days(1),
                initial_message: None,
            },
            today,
        )
        .unwrap();
        (exchange, beneficiary, donor)
    }

    #[test]
    fn recipient_is_the_other_party() {
        let (exchange, beneficiary, donor) = exchange();
        let msg = Message::compose(&exchange, donor, "See you Saturday".into()).unwrap();
        assert_eq!(msg.recipient_id(), &beneficiary);
        assert!(!msg.is_read());
    }

    #[test]
    fn outsiders_cannot_send() {
        let (exchange, _, _) = exchange();
        let err = Message::compose(&exchange, UserId::new(), "hi".into()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }

    #[test]
    fn empty_content_is_rejected() {
        let (exchange, beneficiary, _) = exchange();
        let err = Message::compose(&exchange, beneficiary, "  ".into()).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyField);
    }

    #[test]
    fn only_recipient_marks_read() {
        let (exchange, beneficiary, donor) = exchange();
        let mut msg = Message::compose(&exchange, beneficiary, "hi".into()).unwrap();
        assert!(msg.ensure_recipient(&beneficiary).is_err());
        assert!(msg.ensure_recipient(&donor).is_ok());
        msg.mark_read();
        msg.mark_read();
        assert!(msg.is_read());
    }
}
