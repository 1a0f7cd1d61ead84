//! Email value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Maximum length of an email address.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Normalized (trimmed, lower-cased) email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Parses and normalizes an email address.
    ///
    /// Requires exactly one `@` with non-empty parts on both sides and a dot
    /// in the domain.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let email = raw.trim().to_lowercase();
        if email.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if email.len() > MAX_EMAIL_LENGTH {
            return Err(ValidationError::too_long("email", MAX_EMAIL_LENGTH));
        }
        let (local, domain) = email
            .split_once('@')
            .ok_or_else(|| ValidationError::invalid_format("email", "missing @ symbol"))?;
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return Err(ValidationError::invalid_format("email", "malformed address"));
        }
        if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
            return Err(ValidationError::invalid_format("email", "invalid domain"));
        }
        if email.chars().any(char::is_whitespace) {
            return Err(ValidationError::invalid_format("email", "contains whitespace"));
        }
        Ok(Self(email))
    }

    /// Wraps an already-normalized value loaded from storage.
    pub fn from_trusted(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        let email = Email::parse("  Dana@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "dana@example.com");
    }

    #[test]
    fn rejects_missing_at() {
        assert!(matches!(
            Email::parse("dana.example.com"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn rejects_empty_parts() {
        assert!(Email::parse("@example.com").is_err());
        assert!(Email::parse("dana@").is_err());
        assert!(Email::parse("dana@localhost").is_err());
        assert!(Email::parse("a@b@example.com").is_err());
    }

    #[test]
    fn rejects_blank() {
        assert!(matches!(
            Email::parse("   "),
            Err(ValidationError::EmptyField { .. })
        ));
    }
}
