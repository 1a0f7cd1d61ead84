//! Review repository port.
//!
//! The (exchange, reviewer) pair is unique in storage. Implementations report
//! a violated uniqueness as `ConstraintViolation`, never as a silent no-op.

use crate::domain::foundation::{DomainError, ExchangeId, UserId};
use crate::domain::notification::Notification;
use crate::domain::review::Review;
use async_trait::async_trait;

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Insert a review and the reviewee's notification atomically.
    ///
    /// # Errors
    ///
    /// - `ConstraintViolation` if this reviewer already reviewed the exchange
    async fn save(&self, review: &Review, notification: &Notification) -> Result<(), DomainError>;

    async fn exists_for_reviewer(
        &self,
        exchange_id: &ExchangeId,
        reviewer_id: &UserId,
    ) -> Result<bool, DomainError>;

    /// Reviews received by a user, newest first.
    async fn list_for_reviewee(&self, reviewee_id: &UserId) -> Result<Vec<Review>, DomainError>;

    /// Mean rating received by a user; 0.0 when there are none.
    async fn average_rating(&self, reviewee_id: &UserId) -> Result<f64, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ReviewRepository) {}
    }
}
