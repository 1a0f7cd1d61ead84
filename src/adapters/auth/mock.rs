//! Mock credential adapters for testing.
//!
//! These adapters stand in for the JWT authenticator and the argon2 hasher
//! so handler and router tests stay fast and deterministic.
//!
//! # Example
//!
//! ```ignore
//! let validator = MockSessionValidator::new()
//!     .with_user("ann-token", AuthenticatedUser::new(ann_id, "ann@example.com", "Ann"));
//!
//! let result = validator.validate("ann-token").await;
//! assert!(result.is_ok());
//! ```

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, DomainError, Timestamp};
use crate::domain::user::User;
use crate::ports::{IssuedToken, PasswordHasher, SessionValidator, TokenIssuer};

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Mock session validator.
///
/// Stores a map of tokens to users. Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    /// Optional error to return for all validations
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to a user.
    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.add_token(token, user);
        self
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *write(&self.force_error) = Some(error);
        self
    }

    /// Registers a new valid token at runtime.
    pub fn add_token(&self, token: impl Into<String>, user: AuthenticatedUser) {
        write(&self.tokens).insert(token.into(), user);
    }

    pub fn remove_token(&self, token: &str) {
        write(&self.tokens).remove(token);
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = read(&self.force_error).clone() {
            return Err(error);
        }

        read(&self.tokens)
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

/// Reversible "hash" that keeps test fixtures readable.
#[derive(Debug, Default, Clone)]
pub struct MockPasswordHasher;

impl MockPasswordHasher {
    const PREFIX: &'static str = "mock-hash:";

    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for MockPasswordHasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        Ok(format!("{}{}", Self::PREFIX, password))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        hash.strip_prefix(Self::PREFIX) == Some(password)
    }
}

/// Issues `token-{user id}` and remembers the user so a paired
/// [`MockSessionValidator`] accepts the token.
#[derive(Debug, Default)]
pub struct MockTokenIssuer {
    issued: RwLock<Vec<(String, AuthenticatedUser)>>,
}

impl MockTokenIssuer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies every token issued so far into `validator`.
    pub fn register_with(&self, validator: &MockSessionValidator) {
        for (token, user) in read(&self.issued).iter() {
            validator.add_token(token.clone(), user.clone());
        }
    }

    pub fn issued_count(&self) -> usize {
        read(&self.issued).len()
    }
}

impl TokenIssuer for MockTokenIssuer {
    fn issue(&self, user: &User) -> Result<IssuedToken, DomainError> {
        let token = format!("token-{}", user.id());
        let identity = AuthenticatedUser::new(*user.id(), user.email().as_str(), user.name());
        write(&self.issued).push((token.clone(), identity));
        Ok(IssuedToken {
            token,
            expires_at: Timestamp::now().plus_hours(24),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;

    #[tokio::test]
    async fn validator_returns_registered_user() {
        let id = UserId::new();
        let validator = MockSessionValidator::new()
            .with_user("tok", AuthenticatedUser::new(id, "a@b.io", "Ann"));

        assert_eq!(validator.validate("tok").await.unwrap().id, id);
        assert_eq!(
            validator.validate("other").await.unwrap_err(),
            AuthError::InvalidToken
        );
    }

    #[tokio::test]
    async fn forced_error_wins() {
        let validator = MockSessionValidator::new()
            .with_user("tok", AuthenticatedUser::new(UserId::new(), "a@b.io", "Ann"))
            .with_error(AuthError::TokenExpired);

        assert_eq!(
            validator.validate("tok").await.unwrap_err(),
            AuthError::TokenExpired
        );
    }

    #[test]
    fn mock_hasher_round_trips() {
        let hasher = MockPasswordHasher::new();
        let hash = hasher.hash("pw1234").unwrap();
        assert!(hasher.verify("pw1234", &hash));
        assert!(!hasher.verify("pw12345", &hash));
    }
}
