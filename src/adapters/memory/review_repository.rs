use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::Tables;
use crate::domain::foundation::{average_rating, DomainError, ErrorCode, ExchangeId, Rating, UserId};
use crate::domain::notification::Notification;
use crate::domain::review::Review;
use crate::ports::ReviewRepository;

pub struct InMemoryReviewRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryReviewRepository {
    pub(crate) fn new(tables: Arc<RwLock<Tables>>) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    async fn save(&self, review: &Review, notification: &Notification) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let duplicate = tables.reviews.iter().any(|r| {
            r.exchange_id() == review.exchange_id() && r.reviewer_id() == review.reviewer_id()
        });
        if duplicate {
            return Err(DomainError::new(
                ErrorCode::ConstraintViolation,
                "A review for this exchange by this reviewer already exists",
            )
            .with_detail("exchange_id", review.exchange_id().to_string()));
        }
        tables.reviews.push(review.clone());
        tables.notifications.push(notification.clone());
        Ok(())
    }

    async fn exists_for_reviewer(
        &self,
        exchange_id: &ExchangeId,
        reviewer_id: &UserId,
    ) -> Result<bool, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .reviews
            .iter()
            .any(|r| r.exchange_id() == exchange_id && r.reviewer_id() == reviewer_id))
    }

    async fn list_for_reviewee(&self, reviewee_id: &UserId) -> Result<Vec<Review>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .reviews
            .iter()
            .rev()
            .filter(|r| r.reviewee_id() == reviewee_id)
            .cloned()
            .collect())
    }

    async fn average_rating(&self, reviewee_id: &UserId) -> Result<f64, DomainError> {
        let tables = self.tables.read().await;
        let ratings: Vec<Rating> = tables
            .reviews
            .iter()
            .filter(|r| r.reviewee_id() == reviewee_id)
            .map(|r| r.rating())
            .collect();
        Ok(average_rating(&ratings))
    }
}
