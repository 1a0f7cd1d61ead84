//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the exchange marketplace.

mod auth;
mod command;
mod errors;
mod exchange_status;
mod ids;
mod ownership;
mod pagination;
mod rating;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ErrorKind, ValidationError};
pub use exchange_status::ExchangeStatus;
pub use ids::{
    ExchangeId, ItemListingId, MessageId, NotificationId, ReviewId, SkillListingId, UserId,
};
pub use ownership::OwnedByUser;
pub use pagination::{Page, PageRequest};
pub use rating::{average_rating, Rating};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;

/// Validates an optional or required free-text field against a maximum length.
///
/// Length is counted in characters, not bytes.
pub(crate) fn check_length(
    field: &str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::too_long(field, max));
    }
    Ok(())
}

/// Validates a required text field: non-blank and within `max` characters.
pub(crate) fn check_required(
    field: &str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    check_length(field, value, max)
}
