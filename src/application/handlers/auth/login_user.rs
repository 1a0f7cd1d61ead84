//! LoginHandler - exchanges credentials for an access token.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::user::{Email, User};
use crate::ports::{IssuedToken, PasswordHasher, TokenIssuer, UserRepository};

#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct LoginResult {
    pub token: IssuedToken,
    pub user: User,
}

pub struct LoginHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    issuer: Arc<dyn TokenIssuer>,
}

fn invalid_credentials() -> DomainError {
    DomainError::new(ErrorCode::InvalidCredentials, "Invalid email or password")
}

impl LoginHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        issuer: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            users,
            hasher,
            issuer,
        }
    }

    /// Every failure cause yields the same `InvalidCredentials` error.
    pub async fn handle(&self, cmd: LoginCommand) -> Result<LoginResult, DomainError> {
        let email = Email::parse(&cmd.email).map_err(|_| invalid_credentials())?;
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(invalid_credentials)?;

        if !self.hasher.verify(&cmd.password, user.password_hash()) {
            tracing::debug!(user_id = %user.id(), "Login rejected");
            return Err(invalid_credentials());
        }

        let token = self.issuer.issue(&user)?;
        tracing::info!(user_id = %user.id(), "User logged in");
        Ok(LoginResult { token, user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::{MockPasswordHasher, MockTokenIssuer};
    use crate::adapters::memory::InMemoryDatabase;
    use crate::application::handlers::auth::{RegisterUserCommand, RegisterUserHandler};
    use crate::domain::foundation::ErrorKind;

    async fn setup() -> (LoginHandler, Arc<MockTokenIssuer>) {
        let users = Arc::new(InMemoryDatabase::new().user_repository());
        let hasher = Arc::new(MockPasswordHasher::new());
        let issuer = Arc::new(MockTokenIssuer::new());
        RegisterUserHandler::new(users.clone(), hasher.clone())
            .handle(RegisterUserCommand {
                email: "ann@example.com".into(),
                password: "secret1".into(),
                name: "Ann".into(),
                location: "Lyon".into(),
            })
            .await
            .unwrap();
        (LoginHandler::new(users, hasher, issuer.clone()), issuer)
    }

    fn login(email: &str, password: &str) -> LoginCommand {
        LoginCommand {
            email: email.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn valid_credentials_return_token_and_user() {
        let (handler, issuer) = setup().await;

        let result = handler.handle(login("ANN@example.com", "secret1")).await.unwrap();

        assert_eq!(result.user.name(), "Ann");
        assert_eq!(result.token.token, format!("token-{}", result.user.id()));
        assert_eq!(issuer.issued_count(), 1);
    }

    #[tokio::test]
    async fn all_failures_look_the_same() {
        let (handler, issuer) = setup().await;

        let wrong_password = handler.handle(login("ann@example.com", "nope")).await.unwrap_err();
        let unknown_email = handler.handle(login("bob@example.com", "secret1")).await.unwrap_err();
        let garbage = handler.handle(login("???", "secret1")).await.unwrap_err();

        for err in [wrong_password, unknown_email, garbage] {
            assert_eq!(err.code, ErrorCode::InvalidCredentials);
            assert_eq!(err.kind(), ErrorKind::AuthenticationFailure);
            assert_eq!(err.message, "Invalid email or password");
        }
        assert_eq!(issuer.issued_count(), 0);
    }
}
