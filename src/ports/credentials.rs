//! Credential ports: password hashing and access token issuance.
//!
//! Both are synchronous; hashing is CPU-bound and token signing is local.

use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::user::User;

/// One-way password hashing.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password for storage.
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Whether `password` matches `hash`. An unparsable hash never matches.
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// A signed bearer token handed out at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: Timestamp,
}

/// Mints access tokens that a `SessionValidator` will later accept.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user: &User) -> Result<IssuedToken, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_ports_are_object_safe() {
        fn _hasher(_h: &dyn PasswordHasher) {}
        fn _issuer(_i: &dyn TokenIssuer) {}
    }
}
