//! ExchangeRequest aggregate.
//!
//! An exchange request links a beneficiary (the requester) to a donor (the
//! owner of the referenced listing). The donor is always derived from the
//! listing, never supplied by the requester.
//!
//! # Lifecycle
//!
//! Every status change goes through [`ExchangeStatus::transition_to`]; the
//! mutation methods add the actor checks on top and return the previous
//! status so persistence can compare-and-set on it.

use chrono::NaiveDate;

use crate::domain::foundation::{
    check_length, check_required, DomainError, ErrorCode, ExchangeId, ExchangeStatus,
    StateMachine, Timestamp, UserId,
};
use crate::domain::listing::ListingRef;

pub const MAX_OFFER_LENGTH: usize = 500;
pub const MAX_INITIAL_MESSAGE_LENGTH: usize = 1000;

/// What the beneficiary proposes when opening a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeProposal {
    /// What the beneficiary offers in return.
    pub offer: String,
    /// Day the exchange should happen; must be after `today` at creation.
    pub exchange_date: NaiveDate,
    pub initial_message: Option<String>,
}

/// Side of an exchange a user is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Participant {
    Donor,
    Beneficiary,
}

/// Exchange request between two users about one listing.
///
/// # Invariants
///
/// - `donor_id` is the owner of `listing`
/// - `beneficiary_id != donor_id`
/// - status only moves along the `ExchangeStatus` state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeRequest {
    id: ExchangeId,
    listing: ListingRef,
    beneficiary_id: UserId,
    donor_id: UserId,
    offer: String,
    exchange_date: NaiveDate,
    initial_message: Option<String>,
    status: ExchangeStatus,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl ExchangeRequest {
    /// Opens a new PENDING request.
    ///
    /// # Errors
    ///
    /// - `EmptyField` / `InvalidFormat` for a blank or overlong offer or message
    /// - `ValidationFailed` if the date is not in the future
    /// - `ValidationFailed` if the beneficiary owns the listing
    pub fn create(
        listing: ListingRef,
        beneficiary_id: UserId,
        donor_id: UserId,
        proposal: ExchangeProposal,
        today: NaiveDate,
    ) -> Result<Self, DomainError> {
        check_required("offer", &proposal.offer, MAX_OFFER_LENGTH)?;
        if let Some(message) = &proposal.initial_message {
            check_length("initial_message", message, MAX_INITIAL_MESSAGE_LENGTH)?;
        }
        if proposal.exchange_date <= today {
            return Err(DomainError::validation(
                "exchange_date",
                "Exchange date must be in the future",
            ));
        }
        if beneficiary_id == donor_id {
            return Err(DomainError::validation(
                "listing",
                "You cannot request an exchange on your own listing",
            ));
        }

        let now = Timestamp::now();
        Ok(Self {
            id: ExchangeId::new(),
            listing,
            beneficiary_id,
            donor_id,
            offer: proposal.offer,
            exchange_date: proposal.exchange_date,
            initial_message: proposal.initial_message,
            status: ExchangeStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ExchangeId,
        listing: ListingRef,
        beneficiary_id: UserId,
        donor_id: UserId,
        offer: String,
        exchange_date: NaiveDate,
        initial_message: Option<String>,
        status: ExchangeStatus,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            listing,
            beneficiary_id,
            donor_id,
            offer,
            exchange_date,
            initial_message,
            status,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &ExchangeId {
        &self.id
    }

    pub fn listing(&self) -> &ListingRef {
        &self.listing
    }

    pub fn beneficiary_id(&self) -> &UserId {
        &self.beneficiary_id
    }

    pub fn donor_id(&self) -> &UserId {
        &self.donor_id
    }

    pub fn offer(&self) -> &str {
        &self.offer
    }

    pub fn exchange_date(&self) -> NaiveDate {
        self.exchange_date
    }

    pub fn initial_message(&self) -> Option<&str> {
        self.initial_message.as_deref()
    }

    pub fn status(&self) -> ExchangeStatus {
        self.status
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Participation
    // ─────────────────────────────────────────────────────────────────────────

    /// Which side `user_id` is on, if any.
    pub fn role_of(&self, user_id: &UserId) -> Option<Participant> {
        if user_id == &self.donor_id {
            Some(Participant::Donor)
        } else if user_id == &self.beneficiary_id {
            Some(Participant::Beneficiary)
        } else {
            None
        }
    }

    pub fn is_participant(&self, user_id: &UserId) -> bool {
        self.role_of(user_id).is_some()
    }

    /// The participant opposite to `user_id`.
    pub fn counterpart_of(&self, user_id: &UserId) -> Option<UserId> {
        match self.role_of(user_id)? {
            Participant::Donor => Some(self.beneficiary_id),
            Participant::Beneficiary => Some(self.donor_id),
        }
    }

    /// Hides the request from non-participants as if it did not exist.
    pub fn ensure_visible_to(&self, user_id: &UserId) -> Result<(), DomainError> {
        if self.is_participant(user_id) {
            Ok(())
        } else {
            Err(DomainError::not_found(
                ErrorCode::ExchangeNotFound,
                "Exchange request",
                self.id,
            ))
        }
    }

    /// Requires `user_id` to be one of the two parties.
    pub fn ensure_participant(&self, user_id: &UserId) -> Result<Participant, DomainError> {
        self.role_of(user_id).ok_or_else(|| {
            DomainError::new(
                ErrorCode::Forbidden,
                "Only the participants of this exchange can do this",
            )
            .with_detail("exchange_id", self.id.to_string())
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Donor accepts a pending request. Returns the previous status.
    pub fn accept(&mut self, actor: &UserId) -> Result<ExchangeStatus, DomainError> {
        self.ensure_donor(actor, "accept")?;
        self.ensure_status(ExchangeStatus::Pending, "Exchange request is no longer acceptable")?;
        self.apply(ExchangeStatus::Accepted)
    }

    /// Donor refuses a pending request. Returns the previous status.
    pub fn refuse(&mut self, actor: &UserId) -> Result<ExchangeStatus, DomainError> {
        self.ensure_donor(actor, "refuse")?;
        self.ensure_status(ExchangeStatus::Pending, "Exchange request is no longer refusable")?;
        self.apply(ExchangeStatus::Refused)
    }

    /// Either party marks an accepted exchange as done. Returns the previous status.
    pub fn complete(&mut self, actor: &UserId) -> Result<ExchangeStatus, DomainError> {
        self.ensure_participant(actor)?;
        self.ensure_status(
            ExchangeStatus::Accepted,
            "Only accepted exchanges can be completed",
        )?;
        self.apply(ExchangeStatus::Completed)
    }

    /// Beneficiary withdraws a pending request. Returns the previous status.
    pub fn cancel(&mut self, actor: &UserId) -> Result<ExchangeStatus, DomainError> {
        if actor != &self.beneficiary_id {
            return Err(DomainError::new(
                ErrorCode::Forbidden,
                "Only the requester can cancel this exchange",
            )
            .with_detail("exchange_id", self.id.to_string()));
        }
        self.ensure_status(
            ExchangeStatus::Pending,
            "Only pending exchange requests can be cancelled",
        )?;
        self.apply(ExchangeStatus::Cancelled)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn ensure_donor(&self, actor: &UserId, action: &str) -> Result<(), DomainError> {
        if actor == &self.donor_id {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                format!("Only the listing owner can {} this exchange", action),
            )
            .with_detail("exchange_id", self.id.to_string()))
        }
    }

    fn ensure_status(&self, expected: ExchangeStatus, message: &str) -> Result<(), DomainError> {
        if self.status == expected {
            Ok(())
        } else {
            Err(DomainError::new(ErrorCode::InvalidStateTransition, message)
                .with_detail("status", self.status.to_string()))
        }
    }

    fn apply(&mut self, target: ExchangeStatus) -> Result<ExchangeStatus, DomainError> {
        let previous = self.status;
        self.status = previous.transition_to(target)?;
        self.updated_at = Timestamp::now();
        Ok(previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ErrorKind, ItemListingId};
    use chrono::Duration;
    use proptest::prelude::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 6, 1).unwrap()
    }

    fn proposal() -> ExchangeProposal {
        ExchangeProposal {
            offer: "A jar of honey".to_string(),
            exchange_date: today() + Duration::days(3),
            initial_message: Some("Hello!".to_string()),
        }
    }

    fn pending() -> (ExchangeRequest, UserId, UserId) {
        let beneficiary = UserId::new();
        let donor = UserId::new();
        let exchange = ExchangeRequest::create(
            ListingRef::Item(ItemListingId::new()),
            beneficiary,
            donor,
            proposal(),
            today(),
        )
        .unwrap();
        (exchange, beneficiary, donor)
    }

    fn with_status(status: ExchangeStatus) -> (ExchangeRequest, UserId, UserId) {
        let (exchange, beneficiary, donor) = pending();
        let exchange = ExchangeRequest::reconstitute(
            *exchange.id(),
            *exchange.listing(),
            beneficiary,
            donor,
            exchange.offer().to_string(),
            exchange.exchange_date(),
            None,
            status,
            *exchange.created_at(),
            *exchange.updated_at(),
        );
        (exchange, beneficiary, donor)
    }

    #[test]
    fn create_starts_pending() {
        let (exchange, beneficiary, donor) = pending();
        assert_eq!(exchange.status(), ExchangeStatus::Pending);
        assert_eq!(exchange.role_of(&beneficiary), Some(Participant::Beneficiary));
        assert_eq!(exchange.role_of(&donor), Some(Participant::Donor));
        assert_eq!(exchange.counterpart_of(&donor), Some(beneficiary));
    }

    #[test]
    fn create_rejects_today_and_past_dates() {
        let mut p = proposal();
        p.exchange_date = today();
        let err = ExchangeRequest::create(
            ListingRef::Item(ItemListingId::new()),
            UserId::new(),
            UserId::new(),
            p,
            today(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn create_rejects_own_listing() {
        let user = UserId::new();
        let err = ExchangeRequest::create(
            ListingRef::Item(ItemListingId::new()),
            user,
            user,
            proposal(),
            today(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn create_rejects_blank_offer() {
        let mut p = proposal();
        p.offer = "   ".to_string();
        let result = ExchangeRequest::create(
            ListingRef::Item(ItemListingId::new()),
            UserId::new(),
            UserId::new(),
            p,
            today(),
        );
        assert_eq!(result.unwrap_err().code, ErrorCode::EmptyField);
    }

    #[test]
    fn donor_accepts_pending() {
        let (mut exchange, _, donor) = pending();
        let previous = exchange.accept(&donor).unwrap();
        assert_eq!(previous, ExchangeStatus::Pending);
        assert_eq!(exchange.status(), ExchangeStatus::Accepted);
    }

    #[test]
    fn beneficiary_cannot_accept() {
        let (mut exchange, beneficiary, _) = pending();
        let err = exchange.accept(&beneficiary).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert_eq!(exchange.status(), ExchangeStatus::Pending);
    }

    #[test]
    fn accept_after_refuse_is_illegal_state() {
        let (mut exchange, _, donor) = pending();
        exchange.refuse(&donor).unwrap();
        let err = exchange.accept(&donor).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IllegalState);
        assert!(err.message.contains("no longer acceptable"));
    }

    #[test]
    fn either_party_completes_accepted() {
        let (mut exchange, beneficiary, donor) = pending();
        exchange.accept(&donor).unwrap();
        exchange.complete(&beneficiary).unwrap();
        assert_eq!(exchange.status(), ExchangeStatus::Completed);
    }

    #[test]
    fn stranger_cannot_complete() {
        let (mut exchange, _, donor) = pending();
        exchange.accept(&donor).unwrap();
        let err = exchange.complete(&UserId::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }

    #[test]
    fn complete_requires_accepted() {
        for status in [
            ExchangeStatus::Pending,
            ExchangeStatus::Refused,
            ExchangeStatus::Cancelled,
            ExchangeStatus::Completed,
        ] {
            let (mut exchange, _, donor) = with_status(status);
            let err = exchange.complete(&donor).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::IllegalState, "status {:?}", status);
        }
    }

    #[test]
    fn only_beneficiary_cancels() {
        let (mut exchange, beneficiary, donor) = pending();
        assert_eq!(
            exchange.cancel(&donor).unwrap_err().kind(),
            ErrorKind::Unauthorized
        );
        exchange.cancel(&beneficiary).unwrap();
        assert_eq!(exchange.status(), ExchangeStatus::Cancelled);
    }

    #[test]
    fn cancel_requires_pending() {
        let (mut exchange, beneficiary, _) = with_status(ExchangeStatus::Completed);
        let err = exchange.cancel(&beneficiary).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IllegalState);
    }

    #[test]
    fn non_participant_sees_not_found() {
        let (exchange, beneficiary, _) = pending();
        assert!(exchange.ensure_visible_to(&beneficiary).is_ok());
        let err = exchange.ensure_visible_to(&UserId::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    fn any_status() -> impl Strategy<Value = ExchangeStatus> {
        prop::sample::select(ExchangeStatus::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn non_donor_accept_or_refuse_is_always_unauthorized(status in any_status()) {
            let (mut exchange, beneficiary, _) = with_status(status);
            prop_assert_eq!(exchange.accept(&beneficiary).unwrap_err().kind(), ErrorKind::Unauthorized);
            prop_assert_eq!(exchange.refuse(&UserId::new()).unwrap_err().kind(), ErrorKind::Unauthorized);
            prop_assert_eq!(exchange.status(), status);
        }

        #[test]
        fn successful_actions_follow_state_machine(
            actions in prop::collection::vec(0u8..4, 1..8)
        ) {
            let (mut exchange, beneficiary, donor) = pending();
            for action in actions {
                let before = exchange.status();
                let result = match action {
                    0 => exchange.accept(&donor),
                    1 => exchange.refuse(&donor),
                    2 => exchange.complete(&beneficiary),
                    _ => exchange.cancel(&beneficiary),
                };
                match result {
                    Ok(previous) => {
                        prop_assert_eq!(previous, before);
                        prop_assert!(before.can_transition_to(&exchange.status()));
                    }
                    Err(_) => prop_assert_eq!(exchange.status(), before),
                }
            }
        }
    }
}
