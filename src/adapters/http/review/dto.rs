//! HTTP DTOs for reviews.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ExchangeId, ReviewId, Timestamp, UserId};
use crate::domain::review::Review;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateReviewRequest {
    pub exchange_id: ExchangeId,
    pub rating: i32,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    pub id: ReviewId,
    pub exchange_id: ExchangeId,
    pub reviewer_id: UserId,
    pub reviewee_id: UserId,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: Timestamp,
}

impl From<&Review> for ReviewResponse {
    fn from(review: &Review) -> Self {
        Self {
            id: *review.id(),
            exchange_id: *review.exchange_id(),
            reviewer_id: *review.reviewer_id(),
            reviewee_id: *review.reviewee_id(),
            rating: review.rating().value(),
            comment: review.comment().map(str::to_string),
            created_at: *review.created_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AverageRatingResponse {
    pub user_id: UserId,
    pub average: f64,
}
