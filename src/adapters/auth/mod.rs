//! Authentication adapters.
//!
//! Implementations of the `SessionValidator`, `TokenIssuer` and
//! `PasswordHasher` ports:
//!
//! - `jwt` - HS256 tokens validated against the user store
//! - `password` - Argon2id hashing
//! - `mock` - Test implementations

mod jwt;
mod mock;
mod password;

pub use jwt::JwtAuthenticator;
pub use mock::{MockPasswordHasher, MockSessionValidator, MockTokenIssuer};
pub use password::Argon2PasswordHasher;
