//! RegisterUserHandler - Command handler for account creation.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::user::{validate_password, Email, User};
use crate::ports::{PasswordHasher, UserRepository};

/// Command to register a new account.
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
    pub email: String,
    pub password: String,
    pub name: String,
    pub location: String,
}

/// Handler for registering users.
pub struct RegisterUserHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl RegisterUserHandler {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    pub async fn handle(&self, cmd: RegisterUserCommand) -> Result<User, DomainError> {
        // 1. Validate input
        let email = Email::parse(&cmd.email)?;
        validate_password(&cmd.password)?;

        // 2. Reject taken emails up front; the unique constraint backs this up
        if self.users.exists_by_email(&email).await? {
            return Err(DomainError::new(
                ErrorCode::DuplicateEmail,
                "An account with this email already exists",
            ));
        }

        // 3. Build and persist
        let hash = self.hasher.hash(&cmd.password)?;
        let user = User::register(email, hash, cmd.name, cmd.location)?;
        self.users.save(&user).await?;

        tracing::info!(user_id = %user.id(), "User registered");
        Ok(user)
    }
}
