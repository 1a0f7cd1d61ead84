//! User repository port.
//!
//! Persists registered accounts. Email addresses are unique; the storage
//! constraint is the last word on that, even if a handler pre-checked.

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::{Email, User};
use async_trait::async_trait;

/// Repository port for User aggregate persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Save a newly registered user.
    ///
    /// # Errors
    ///
    /// - `DuplicateEmail` if the email is already taken
    /// - `DatabaseError` on persistence failure
    async fn save(&self, user: &User) -> Result<(), DomainError>;

    /// Update profile fields of an existing user.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, user: &User) -> Result<(), DomainError>;

    /// Find a user by id. Returns `None` if not found.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Find a user by (normalized) email. Returns `None` if not found.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError>;

    /// Whether an account with this email exists.
    async fn exists_by_email(&self, email: &Email) -> Result<bool, DomainError>;
}
