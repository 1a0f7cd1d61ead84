//! PostgreSQL implementation of ExchangeRepository.
//!
//! Status changes are compare-and-set updates on the previous status,
//! committed together with the notification they produce.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use uuid::Uuid;

use super::support::{
    column, corrupt, db_error, insert_notification, listing_ref, timestamp, user_id,
};
use crate::domain::exchange::ExchangeRequest;
use crate::domain::foundation::{DomainError, ErrorCode, ExchangeId, ExchangeStatus, UserId};
use crate::domain::notification::Notification;
use crate::ports::ExchangeRepository;

const EXCHANGE_COLUMNS: &str = "id, item_listing_id, skill_listing_id, beneficiary_id, \
                                donor_id, offer, exchange_date, initial_message, status, \
                                created_at, updated_at";

#[derive(Clone)]
pub struct PostgresExchangeRepository {
    pool: PgPool,
}

impl PostgresExchangeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn list_where(
        &self,
        column_name: &str,
        user_id: &UserId,
    ) -> Result<Vec<ExchangeRequest>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM exchange_requests WHERE {} = $1 ORDER BY created_at DESC",
            EXCHANGE_COLUMNS, column_name
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list exchange requests", e))?;

        rows.into_iter().map(row_to_exchange).collect()
    }
}

#[async_trait]
impl ExchangeRepository for PostgresExchangeRepository {
    async fn create(
        &self,
        exchange: &ExchangeRequest,
        notification: &Notification,
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to start transaction", e))?;

        sqlx::query(
            r#"
            INSERT INTO exchange_requests (
                id, item_listing_id, skill_listing_id, beneficiary_id, donor_id,
                offer, exchange_date, initial_message, status, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(exchange.id().as_uuid())
        .bind(exchange.listing().item_id().map(|id| *id.as_uuid()))
        .bind(exchange.listing().skill_id().map(|id| *id.as_uuid()))
        .bind(exchange.beneficiary_id().as_uuid())
        .bind(exchange.donor_id().as_uuid())
        .bind(exchange.offer())
        .bind(exchange.exchange_date())
        .bind(exchange.initial_message())
        .bind(exchange.status().as_str())
        .bind(exchange.created_at().as_datetime())
        .bind(exchange.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to insert exchange request", e))?;

        insert_notification(&mut tx, notification).await?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit transaction", e))?;
        Ok(())
    }

    async fn transition(
        &self,
        exchange: &ExchangeRequest,
        previous: ExchangeStatus,
        notification: Option<&Notification>,
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to start transaction", e))?;

        let result = sqlx::query(
            r#"
            UPDATE exchange_requests SET
                status = $2,
                updated_at = $3
            WHERE id = $1 AND status = $4
            "#,
        )
        .bind(exchange.id().as_uuid())
        .bind(exchange.status().as_str())
        .bind(exchange.updated_at().as_datetime())
        .bind(previous.as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to update exchange status", e))?;

        if result.rows_affected() == 0 {
            let current: Option<(String,)> =
                sqlx::query_as("SELECT status FROM exchange_requests WHERE id = $1")
                    .bind(exchange.id().as_uuid())
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(|e| db_error("Failed to re-read exchange status", e))?;

            return Err(match current {
                None => DomainError::not_found(
                    ErrorCode::ExchangeNotFound,
                    "Exchange request",
                    exchange.id(),
                ),
                Some((status,)) => DomainError::new(
                    ErrorCode::InvalidStateTransition,
                    "Exchange request was modified concurrently",
                )
                .with_detail("status", status),
            });
        }

        if let Some(notification) = notification {
            insert_notification(&mut tx, notification).await?;
        }

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit transaction", e))?;
        Ok(())
    }

    async fn find_by_id(&self, id: &ExchangeId) -> Result<Option<ExchangeRequest>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM exchange_requests WHERE id = $1",
            EXCHANGE_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch exchange request", e))?;

        row.map(row_to_exchange).transpose()
    }

    async fn list_received(&self, donor_id: &UserId) -> Result<Vec<ExchangeRequest>, DomainError> {
        self.list_where("donor_id", donor_id).await
    }

    async fn list_sent(
        &self,
        beneficiary_id: &UserId,
    ) -> Result<Vec<ExchangeRequest>, DomainError> {
        self.list_where("beneficiary_id", beneficiary_id).await
    }

    async fn count_completed_for_user(&self, user_id: &UserId) -> Result<u64, DomainError> {
        let result: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM exchange_requests
            WHERE status = 'COMPLETED' AND (donor_id = $1 OR beneficiary_id = $1)
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to count completed exchanges", e))?;

        Ok(result.0 as u64)
    }
}

fn row_to_exchange(row: PgRow) -> Result<ExchangeRequest, DomainError> {
    let id: Uuid = column(&row, "id")?;
    let listing = listing_ref(&row)?.ok_or_else(|| corrupt("exchange listing", "no listing"))?;
    let exchange_date: NaiveDate = column(&row, "exchange_date")?;
    let status: String = column(&row, "status")?;
    let status: ExchangeStatus = status.parse().map_err(|e| corrupt("exchange status", e))?;

    Ok(ExchangeRequest::reconstitute(
        ExchangeId::from_uuid(id),
        listing,
        user_id(&row, "beneficiary_id")?,
        user_id(&row, "donor_id")?,
        column(&row, "offer")?,
        exchange_date,
        column(&row, "initial_message")?,
        status,
        timestamp(&row, "created_at")?,
        timestamp(&row, "updated_at")?,
    ))
}
