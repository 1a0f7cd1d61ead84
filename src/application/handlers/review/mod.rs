//! Review handlers: leaving a review and reading a user's reputation.

mod create_review;

pub use create_review::{CreateReviewCommand, CreateReviewHandler};

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::review::Review;
use crate::ports::ReviewRepository;

/// Public review queries.
pub struct ReviewQueryHandler {
    reviews: Arc<dyn ReviewRepository>,
}

impl ReviewQueryHandler {
    pub fn new(reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { reviews }
    }

    /// Reviews the user received, newest first.
    pub async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Review>, DomainError> {
        self.reviews.list_for_reviewee(user_id).await
    }

    /// 0.0 when the user has no reviews.
    pub async fn average_rating(&self, user_id: &UserId) -> Result<f64, DomainError> {
        self.reviews.average_rating(user_id).await
    }
}
