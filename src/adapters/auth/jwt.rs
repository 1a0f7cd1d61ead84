//! HS256 JWT issuance and validation backed by the user store.
//!
//! # Token shape
//!
//! - `sub`: normalized email of the user
//! - `uid`: user id
//! - `iat` / `exp`: issue and expiry time (seconds since epoch)
//!
//! Validation checks the signature and expiry, then loads the user by `uid`
//! so tokens of deleted accounts stop working immediately.

use std::sync::Arc;

use async_trait::async_trait;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    AuthError, AuthenticatedUser, DomainError, ErrorCode, Timestamp, UserId,
};
use crate::domain::user::User;
use crate::ports::{IssuedToken, SessionValidator, TokenIssuer, UserRepository};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    uid: String,
    iat: i64,
    exp: i64,
}

/// Signs and checks bearer tokens with a shared secret.
pub struct JwtAuthenticator {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_hours: i64,
    users: Arc<dyn UserRepository>,
}

impl JwtAuthenticator {
    pub fn new(secret: &Secret<String>, ttl_hours: u32, users: Arc<dyn UserRepository>) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(bytes),
            decoding_key: DecodingKey::from_secret(bytes),
            ttl_hours: i64::from(ttl_hours),
            users,
        }
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token expired");
                        AuthError::TokenExpired
                    }
                    _ => {
                        tracing::warn!("Token validation failed: {}", e);
                        AuthError::InvalidToken
                    }
                }
            })
    }
}

impl TokenIssuer for JwtAuthenticator {
    fn issue(&self, user: &User) -> Result<IssuedToken, DomainError> {
        let now = Timestamp::now();
        let expires_at = now.plus_hours(self.ttl_hours);
        let claims = Claims {
            sub: user.email().as_str().to_string(),
            uid: user.id().to_string(),
            iat: now.as_unix_secs(),
            exp: expires_at.as_unix_secs(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to sign access token");
                DomainError::new(ErrorCode::InternalError, "Failed to issue access token")
            })?;

        Ok(IssuedToken { token, expires_at })
    }
}

#[async_trait]
impl SessionValidator for JwtAuthenticator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let claims = self.decode_claims(token)?;
        let user_id: UserId = claims.uid.parse().map_err(|_| AuthError::InvalidToken)?;

        let user = self
            .users
            .find_by_id(&user_id)
            .await
            .map_err(|e| AuthError::service_unavailable(e.message))?
            .ok_or(AuthError::UserNotFound)?;

        if user.email().as_str() != claims.sub {
            return Err(AuthError::InvalidToken);
        }

        Ok(AuthenticatedUser::new(
            *user.id(),
            user.email().as_str(),
            user.name(),
        ))
    }
}
