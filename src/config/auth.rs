//! Authentication configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Minimum HS256 key length accepted in production.
pub const MIN_PRODUCTION_SECRET_BYTES: usize = 32;

/// Token signing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC key for issued tokens
    pub jwt_secret: Secret<String>,

    /// Lifetime of an issued token
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: u32,
}

impl AuthConfig {
    /// Validate authentication configuration
    ///
    /// Short secrets are tolerated outside production.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if *environment == Environment::Production
            && secret.len() < MIN_PRODUCTION_SECRET_BYTES
        {
            return Err(ValidationError::JwtSecretTooShort(
                MIN_PRODUCTION_SECRET_BYTES,
            ));
        }
        if !(1..=720).contains(&self.token_ttl_hours) {
            return Err(ValidationError::InvalidTokenTtl);
        }
        Ok(())
    }
}

fn default_token_ttl_hours() -> u32 {
    24
}
