use crate::domain::exchange::ExchangeRequest;
use crate::domain::foundation::{
    check_length, DomainError, ErrorCode, ExchangeId, ExchangeStatus, Rating, ReviewId,
    Timestamp, UserId,
};

pub const MAX_COMMENT_LENGTH: usize = 1000;

/// A rating left by one participant of a completed exchange about the other.
///
/// # Invariants
///
/// - the exchange was COMPLETED when the review was written
/// - at most one review per (exchange, reviewer)
/// - `reviewee_id` is the counterpart of `reviewer_id` on the exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    id: ReviewId,
    exchange_id: ExchangeId,
    reviewer_id: UserId,
    reviewee_id: UserId,
    rating: Rating,
    comment: Option<String>,
    created_at: Timestamp,
}

impl Review {
    /// Writes a review of `exchange` by `reviewer_id`.
    ///
    /// # Errors
    ///
    /// - `ExchangeNotCompleted` unless the exchange is COMPLETED
    /// - `Forbidden` if the reviewer is not a participant
    /// - `InvalidFormat` for an overlong comment
    pub fn write(
        exchange: &ExchangeRequest,
        reviewer_id: UserId,
        rating: Rating,
        comment: Option<String>,
    ) -> Result<Self, DomainError> {
        if exchange.status() != ExchangeStatus::Completed {
            return Err(DomainError::new(
                ErrorCode::ExchangeNotCompleted,
                "You can only review completed exchanges",
            )
            .with_detail("status", exchange.status().to_string()));
        }
        let reviewee_id = exchange.counterpart_of(&reviewer_id).ok_or_else(|| {
            DomainError::new(
                ErrorCode::Forbidden,
                "Only the participants of this exchange can review it",
            )
            .with_detail("exchange_id", exchange.id().to_string())
        })?;
        if let Some(comment) = &comment {
            check_length("comment", comment, MAX_COMMENT_LENGTH)?;
        }

        Ok(Self {
            id: ReviewId::new(),
            exchange_id: *exchange.id(),
            reviewer_id,
            reviewee_id,
            rating,
            comment,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitute from persistence (no validation).
    pub fn reconstitute(
        id: ReviewId,
        exchange_id: ExchangeId,
        reviewer_id: UserId,
        reviewee_id: UserId,
        rating: Rating,
        comment: Option<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            exchange_id,
            reviewer_id,
            reviewee_id,
            rating,
            comment,
            created_at,
        }
    }

    pub fn id(&self) -> &ReviewId {
        &self.id
    }

    pub fn exchange_id(&self) -> &ExchangeId {
        &self.exchange_id
    }

    pub fn reviewer_id(&self) -> &UserId {
        &self.reviewer_id
    }

    pub fn reviewee_id(&self) -> &UserId {
        &self.reviewee_id
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}

/// Error returned when the reviewer already reviewed this exchange.
pub fn already_reviewed(exchange_id: &ExchangeId) -> DomainError {
    DomainError::new(
        ErrorCode::AlreadyReviewed,
        "You have already reviewed this exchange",
    )
    .with_detail("exchange_id", exchange_id.to_string())
}
