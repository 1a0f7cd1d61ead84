//! PostgreSQL implementation of ReviewRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use uuid::Uuid;

use super::support::{
    column, corrupt, db_error, insert_notification, is_unique_violation, timestamp, user_id,
};
use crate::domain::foundation::{DomainError, ErrorCode, ExchangeId, Rating, ReviewId, UserId};
use crate::domain::notification::Notification;
use crate::domain::review::Review;
use crate::ports::ReviewRepository;

#[derive(Clone)]
pub struct PostgresReviewRepository {
    pool: PgPool,
}

impl PostgresReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for PostgresReviewRepository {
    async fn save(&self, review: &Review, notification: &Notification) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to start transaction", e))?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO reviews (
                id, exchange_id, reviewer_id, reviewee_id, rating, comment, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(review.id().as_uuid())
        .bind(review.exchange_id().as_uuid())
        .bind(review.reviewer_id().as_uuid())
        .bind(review.reviewee_id().as_uuid())
        .bind(review.rating().value())
        .bind(review.comment())
        .bind(review.created_at().as_datetime())
        .execute(&mut *tx)
        .await;

        match inserted {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => {
                return Err(DomainError::new(
                    ErrorCode::ConstraintViolation,
                    "A review for this exchange by this reviewer already exists",
                )
                .with_detail("exchange_id", review.exchange_id().to_string()));
            }
            Err(e) => return Err(db_error("Failed to insert review", e)),
        }

        insert_notification(&mut tx, notification).await?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit transaction", e))?;
        Ok(())
    }

    async fn exists_for_reviewer(
        &self,
        exchange_id: &ExchangeId,
        reviewer_id: &UserId,
    ) -> Result<bool, DomainError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM reviews WHERE exchange_id = $1 AND reviewer_id = $2)",
        )
        .bind(exchange_id.as_uuid())
        .bind(reviewer_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to check review", e))?;

        Ok(result.0)
    }

    async fn list_for_reviewee(&self, reviewee_id: &UserId) -> Result<Vec<Review>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, exchange_id, reviewer_id, reviewee_id, rating, comment, created_at
            FROM reviews
            WHERE reviewee_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(reviewee_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch reviews", e))?;

        rows.into_iter().map(row_to_review).collect()
    }

    async fn average_rating(&self, reviewee_id: &UserId) -> Result<f64, DomainError> {
        let result: (Option<f64>,) =
            sqlx::query_as("SELECT AVG(rating)::float8 FROM reviews WHERE reviewee_id = $1")
                .bind(reviewee_id.as_uuid())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| db_error("Failed to compute average rating", e))?;

        Ok(result.0.unwrap_or(0.0))
    }
}

fn row_to_review(row: PgRow) -> Result<Review, DomainError> {
    let id: Uuid = column(&row, "id")?;
    let exchange_id: Uuid = column(&row, "exchange_id")?;
    let rating: i32 = column(&row, "rating")?;
    let rating = Rating::new(rating).map_err(|e| corrupt("rating", e))?;

    Ok(Review::reconstitute(
        ReviewId::from_uuid(id),
        ExchangeId::from_uuid(exchange_id),
        user_id(&row, "reviewer_id")?,
        user_id(&row, "reviewee_id")?,
        rating,
        column(&row, "comment")?,
        timestamp(&row, "created_at")?,
    ))
}
