//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i32,
        max: i32,
        actual: i32,
    },

    #[error("Field '{field}' exceeds {max} characters")]
    TooLong { field: String, max: usize },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i32, max: i32, actual: i32) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    pub fn too_long(field: impl Into<String>, max: usize) -> Self {
        ValidationError::TooLong {
            field: field.into(),
            max,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::TooLong { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

/// Coarse error taxonomy shared by every module.
///
/// Transport adapters map on the kind; the finer [`ErrorCode`] travels in
/// the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Entity is missing, or exists but the caller may not see it.
    NotFound,
    /// Caller lacks the required relationship to the entity.
    Unauthorized,
    /// Malformed or out-of-bounds input.
    InvalidArgument,
    /// Valid request against an entity in the wrong lifecycle state.
    IllegalState,
    /// Storage-level constraint violation.
    Conflict,
    /// Bad credentials.
    AuthenticationFailure,
    /// Infrastructure failure.
    Internal,
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    EmptyField,
    OutOfRange,
    InvalidFormat,
    InvalidListingReference,

    // Not found errors
    UserNotFound,
    ListingNotFound,
    ExchangeNotFound,
    MessageNotFound,
    NotificationNotFound,
    FileNotFound,

    // State errors
    InvalidStateTransition,
    ExchangeNotCompleted,
    AlreadyReviewed,

    // Authorization errors
    Unauthorized,
    Forbidden,
    InvalidCredentials,

    // Conflict errors
    DuplicateEmail,
    ConstraintViolation,

    // Infrastructure errors
    DatabaseError,
    StorageError,
    InternalError,
}

impl ErrorCode {
    /// Returns the taxonomy bucket for this code.
    pub fn kind(&self) -> ErrorKind {
        use ErrorCode::*;
        match self {
            ValidationFailed | EmptyField | OutOfRange | InvalidFormat
            | InvalidListingReference => ErrorKind::InvalidArgument,
            UserNotFound | ListingNotFound | ExchangeNotFound | MessageNotFound
            | NotificationNotFound | FileNotFound => ErrorKind::NotFound,
            InvalidStateTransition | ExchangeNotCompleted | AlreadyReviewed => {
                ErrorKind::IllegalState
            }
            Unauthorized | Forbidden => ErrorKind::Unauthorized,
            InvalidCredentials => ErrorKind::AuthenticationFailure,
            DuplicateEmail | ConstraintViolation => ErrorKind::Conflict,
            DatabaseError | StorageError | InternalError => ErrorKind::Internal,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::InvalidListingReference => "INVALID_LISTING_REFERENCE",
            ErrorCode::UserNotFound => "USER_NOT_FOUND",
            ErrorCode::ListingNotFound => "LISTING_NOT_FOUND",
            ErrorCode::ExchangeNotFound => "EXCHANGE_NOT_FOUND",
            ErrorCode::MessageNotFound => "MESSAGE_NOT_FOUND",
            ErrorCode::NotificationNotFound => "NOTIFICATION_NOT_FOUND",
            ErrorCode::FileNotFound => "FILE_NOT_FOUND",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::ExchangeNotCompleted => "EXCHANGE_NOT_COMPLETED",
            ErrorCode::AlreadyReviewed => "DUPLICATE_REVIEW",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::DuplicateEmail => "DUPLICATE_EMAIL",
            ErrorCode::ConstraintViolation => "CONSTRAINT_VIOLATION",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message).with_detail("field", field.into())
    }

    pub fn not_found(code: ErrorCode, entity: &str, id: impl fmt::Display) -> Self {
        Self::new(code, format!("{} not found: {}", entity, id))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Taxonomy bucket of this error.
    pub fn kind(&self) -> ErrorKind {
        self.code.kind()
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let code = match &err {
            ValidationError::EmptyField { .. } => ErrorCode::EmptyField,
            ValidationError::OutOfRange { .. } => ErrorCode::OutOfRange,
            ValidationError::TooLong { .. } | ValidationError::InvalidFormat { .. } => {
                ErrorCode::InvalidFormat
            }
        };
        let field = err.field().to_string();
        DomainError::new(code, err.to_string()).with_detail("field", field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("offer");
        assert_eq!(format!("{}", err), "Field 'offer' cannot be empty");
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("rating", 1, 5, 7);
        assert_eq!(
            format!("{}", err),
            "Field 'rating' must be between 1 and 5, got 7"
        );
    }

    #[test]
    fn validation_error_too_long_displays_correctly() {
        let err = ValidationError::too_long("content", 2000);
        assert_eq!(format!("{}", err), "Field 'content' exceeds 2000 characters");
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::ExchangeNotFound, "Exchange not found");
        assert_eq!(format!("{}", err), "[EXCHANGE_NOT_FOUND] Exchange not found");
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::new(ErrorCode::ValidationFailed, "Validation failed")
            .with_detail("field", "email")
            .with_detail("reason", "invalid format");

        assert_eq!(err.details.get("field"), Some(&"email".to_string()));
        assert_eq!(err.details.get("reason"), Some(&"invalid format".to_string()));
    }

    #[test]
    fn validation_error_converts_to_invalid_argument() {
        let err: DomainError = ValidationError::out_of_range("rating", 1, 5, 0).into();
        assert_eq!(err.code, ErrorCode::OutOfRange);
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.details.get("field"), Some(&"rating".to_string()));
    }

    #[test]
    fn every_code_belongs_to_expected_kind() {
        assert_eq!(ErrorCode::ListingNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(ErrorCode::Forbidden.kind(), ErrorKind::Unauthorized);
        assert_eq!(ErrorCode::AlreadyReviewed.kind(), ErrorKind::IllegalState);
        assert_eq!(ErrorCode::ConstraintViolation.kind(), ErrorKind::Conflict);
        assert_eq!(ErrorCode::DuplicateEmail.kind(), ErrorKind::Conflict);
        assert_eq!(
            ErrorCode::InvalidCredentials.kind(),
            ErrorKind::AuthenticationFailure
        );
        assert_eq!(ErrorCode::DatabaseError.kind(), ErrorKind::Internal);
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::AlreadyReviewed), "DUPLICATE_REVIEW");
        assert_eq!(format!("{}", ErrorCode::InternalError), "INTERNAL_ERROR");
    }
}
