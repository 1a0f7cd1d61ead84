//! CreateReviewHandler - rate the other party of a completed exchange.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, DomainError, ErrorCode, ExchangeId, Rating};
use crate::domain::notification::Notification;
use crate::domain::review::{already_reviewed, Review};
use crate::ports::{ExchangeRepository, ReviewRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct CreateReviewCommand {
    pub exchange_id: ExchangeId,
    pub rating: i32,
    pub comment: Option<String>,
}

pub struct CreateReviewHandler {
    users: Arc<dyn UserRepository>,
    exchanges: Arc<dyn ExchangeRepository>,
    reviews: Arc<dyn ReviewRepository>,
}

impl CreateReviewHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        exchanges: Arc<dyn ExchangeRepository>,
        reviews: Arc<dyn ReviewRepository>,
    ) -> Self {
        Self {
            users,
            exchanges,
            reviews,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateReviewCommand,
        metadata: CommandMetadata,
    ) -> Result<Review, DomainError> {
        // 1. Exchange must exist and be completed; reviewer must take part
        let exchange = self
            .exchanges
            .find_by_id(&cmd.exchange_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(
                    ErrorCode::ExchangeNotFound,
                    "Exchange request",
                    cmd.exchange_id,
                )
            })?;
        let rating = Rating::new(cmd.rating)?;
        let reviewer_id = metadata.user_id;
        if self
            .reviews
            .exists_for_reviewer(exchange.id(), &reviewer_id)
            .await?
        {
            return Err(already_reviewed(exchange.id()));
        }
        let review = Review::write(&exchange, reviewer_id, rating, cmd.comment)?;

        let reviewer = self
            .users
            .find_by_id(&reviewer_id)
            .await?
            .ok_or_else(|| DomainError::not_found(ErrorCode::UserNotFound, "User", reviewer_id))?;
        let notification =
            Notification::review_received(*review.reviewee_id(), *exchange.id(), reviewer.name());

        // 2. Second look right before the insert; the unique constraint has the final say
        if self
            .reviews
            .exists_for_reviewer(exchange.id(), &reviewer_id)
            .await?
        {
            return Err(already_reviewed(exchange.id()));
        }
        self.reviews.save(&review, &notification).await?;

        tracing::info!(
            review_id = %review.id(),
            exchange_id = %exchange.id(),
            reviewer_id = %review.reviewer_id(),
            reviewee_id = %review.reviewee_id(),
            rating = review.rating().value(),
            "Review recorded"
        );
        Ok(review)
    }
}
