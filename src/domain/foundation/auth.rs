//! Authentication types for the domain layer.
//!
//! `AuthenticatedUser` is what the `SessionValidator` port yields after a
//! bearer token checks out. It carries no token or provider details.

use super::UserId;
use thiserror::Error;

/// Authenticated user resolved from a validated bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Id of the registered user.
    pub id: UserId,

    /// Login email of the user.
    pub email: String,

    /// Display name (profile name).
    pub display_name: String,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, email: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            display_name: display_name.into(),
        }
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// Token is valid but the user no longer exists.
    #[error("User not found")]
    UserNotFound,

    /// The user store could not be reached.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the user should log in again.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidToken | AuthError::TokenExpired | AuthError::UserNotFound
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authenticated_user_new_sets_fields() {
        let id = UserId::new();
        let user = AuthenticatedUser::new(id, "dana@example.com", "Dana");
        assert_eq!(user.id, id);
        assert_eq!(user.email, "dana@example.com");
        assert_eq!(user.display_name, "Dana");
    }

    #[test]
    fn token_errors_require_reauthentication() {
        assert!(AuthError::InvalidToken.requires_reauthentication());
        assert!(AuthError::TokenExpired.requires_reauthentication());
        assert!(AuthError::UserNotFound.requires_reauthentication());
        assert!(!AuthError::service_unavailable("db down").requires_reauthentication());
    }

    #[test]
    fn service_unavailable_displays_message() {
        let err = AuthError::service_unavailable("Connection refused");
        assert_eq!(format!("{}", err), "Auth service unavailable: Connection refused");
    }
}
