//! Argon2id password hashing.

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher as _, PasswordVerifier};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::PasswordHasher;

/// Hashes with the argon2 crate defaults (Argon2id, PHC string output).
#[derive(Debug, Default, Clone)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| {
                tracing::error!(error = %e, "Password hashing failed");
                DomainError::new(ErrorCode::InternalError, "Failed to hash password")
            })
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash("secret123").unwrap();

        assert_ne!(hash, "secret123");
        assert!(hasher.verify("secret123", &hash));
        assert!(!hasher.verify("wrong", &hash));
    }

    #[test]
    fn unparsable_hash_never_matches() {
        let hasher = Argon2PasswordHasher::new();
        assert!(!hasher.verify("secret123", "plaintext-in-db"));
    }
}
