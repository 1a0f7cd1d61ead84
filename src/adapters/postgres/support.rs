//! Row decoding and error mapping shared by the PostgreSQL repositories.

use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgConnection, Postgres, Row};
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, ErrorCode, ExchangeId, ItemListingId, NotificationId, SkillListingId,
    Timestamp, UserId,
};
use crate::domain::listing::ListingRef;
use crate::domain::notification::{Notification, NotificationKind};

/// Logs an infrastructure failure and wraps it as `DatabaseError`.
pub(super) fn db_error(context: &str, err: sqlx::Error) -> DomainError {
    tracing::error!(error = %err, "{}", context);
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, err))
}

pub(super) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

pub(super) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation())
}

pub(super) fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(name).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get {}: {}", name, e),
        )
    })
}

pub(super) fn timestamp(row: &PgRow, name: &str) -> Result<Timestamp, DomainError> {
    let value: DateTime<Utc> = column(row, name)?;
    Ok(Timestamp::from_datetime(value))
}

pub(super) fn user_id(row: &PgRow, name: &str) -> Result<UserId, DomainError> {
    let value: Uuid = column(row, name)?;
    Ok(UserId::from_uuid(value))
}

/// Rebuilds an optional listing reference from the two nullable id columns.
pub(super) fn listing_ref(row: &PgRow) -> Result<Option<ListingRef>, DomainError> {
    let item: Option<Uuid> = column(row, "item_listing_id")?;
    let skill: Option<Uuid> = column(row, "skill_listing_id")?;
    Ok(match (item, skill) {
        (Some(item), _) => Some(ListingRef::Item(ItemListingId::from_uuid(item))),
        (None, Some(skill)) => Some(ListingRef::Skill(SkillListingId::from_uuid(skill))),
        (None, None) => None,
    })
}

/// Reports a stored value the domain refuses to accept.
pub(super) fn corrupt(what: &str, err: impl std::fmt::Display) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Invalid stored {}: {}", what, err),
    )
}

/// Inserts a notification on an open connection, usually a transaction.
pub(super) async fn insert_notification(
    conn: &mut PgConnection,
    notification: &Notification,
) -> Result<(), DomainError> {
    let listing = notification.listing();
    sqlx::query(
        r#"
        INSERT INTO notifications (
            id, user_id, kind, message, is_read,
            exchange_id, item_listing_id, skill_listing_id, created_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(notification.id().as_uuid())
    .bind(notification.user_id().as_uuid())
    .bind(notification.kind().as_str())
    .bind(notification.message())
    .bind(notification.is_read())
    .bind(notification.exchange_id().map(|id| *id.as_uuid()))
    .bind(listing.and_then(|l| l.item_id()).map(|id| *id.as_uuid()))
    .bind(listing.and_then(|l| l.skill_id()).map(|id| *id.as_uuid()))
    .bind(notification.created_at().as_datetime())
    .execute(&mut *conn)
    .await
    .map_err(|e| db_error("Failed to insert notification", e))?;

    Ok(())
}

pub(super) fn row_to_notification(row: PgRow) -> Result<Notification, DomainError> {
    let id: Uuid = column(&row, "id")?;
    let kind: String = column(&row, "kind")?;
    let kind: NotificationKind = kind.parse().map_err(|e| corrupt("notification kind", e))?;
    let exchange_id: Option<Uuid> = column(&row, "exchange_id")?;

    Ok(Notification::reconstitute(
        NotificationId::from_uuid(id),
        user_id(&row, "user_id")?,
        kind,
        column(&row, "message")?,
        column(&row, "is_read")?,
        exchange_id.map(ExchangeId::from_uuid),
        listing_ref(&row)?,
        timestamp(&row, "created_at")?,
    ))
}
