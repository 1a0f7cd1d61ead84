//! User aggregate: identity, credentials and public profile.

use crate::domain::foundation::{
    check_length, check_required, DomainError, Timestamp, UserId, ValidationError,
};

use super::Email;

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MAX_PASSWORD_LENGTH: usize = 128;
pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_LOCATION_LENGTH: usize = 200;
pub const MAX_BIO_LENGTH: usize = 500;
pub const MAX_PHOTO_LENGTH: usize = 500;
pub const MAX_PHONE_LENGTH: usize = 30;

/// Checks a plaintext password before it is hashed.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::invalid_format(
            "password",
            format!("must be at least {} characters", MIN_PASSWORD_LENGTH),
        ));
    }
    if len > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::too_long("password", MAX_PASSWORD_LENGTH));
    }
    Ok(())
}

/// Partial profile update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub photo: Option<String>,
    pub phone_number: Option<String>,
}

/// Registered marketplace user.
///
/// # Invariants
///
/// - `email` is unique across users (enforced by storage)
/// - `name` is non-blank
/// - `phone_verified` is reset whenever the phone number changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: Email,
    password_hash: String,
    name: String,
    location: String,
    bio: Option<String>,
    photo: Option<String>,
    phone_number: Option<String>,
    phone_verified: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl User {
    /// Creates a new user from validated registration data.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if name is blank
    /// - `InvalidFormat` if name or location is too long
    pub fn register(
        email: Email,
        password_hash: String,
        name: String,
        location: String,
    ) -> Result<Self, DomainError> {
        check_required("name", &name, MAX_NAME_LENGTH)?;
        check_length("location", &location, MAX_LOCATION_LENGTH)?;

        let now = Timestamp::now();
        Ok(Self {
            id: UserId::new(),
            email,
            password_hash,
            name: name.trim().to_string(),
            location: location.trim().to_string(),
            bio: None,
            photo: None,
            phone_number: None,
            phone_verified: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a user from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: UserId,
        email: Email,
        password_hash: String,
        name: String,
        location: String,
        bio: Option<String>,
        photo: Option<String>,
        phone_number: Option<String>,
        phone_verified: bool,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            email,
            password_hash,
            name,
            location,
            bio,
            photo,
            phone_number,
            phone_verified,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn bio(&self) -> Option<&str> {
        self.bio.as_deref()
    }

    pub fn photo(&self) -> Option<&str> {
        self.photo.as_deref()
    }

    pub fn phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }

    pub fn phone_verified(&self) -> bool {
        self.phone_verified
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Applies a partial profile update.
    ///
    /// Validates every provided field before changing anything. A phone
    /// number different from the current one clears `phone_verified`.
    pub fn update_profile(&mut self, update: ProfileUpdate) -> Result<(), DomainError> {
        if let Some(name) = &update.name {
            check_required("name", name, MAX_NAME_LENGTH)?;
        }
        if let Some(location) = &update.location {
            check_length("location", location, MAX_LOCATION_LENGTH)?;
        }
        if let Some(bio) = &update.bio {
            check_length("bio", bio, MAX_BIO_LENGTH)?;
        }
        if let Some(photo) = &update.photo {
            check_length("photo", photo, MAX_PHOTO_LENGTH)?;
        }
        if let Some(phone) = &update.phone_number {
            check_length("phone_number", phone, MAX_PHONE_LENGTH)?;
        }

        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(location) = update.location {
            self.location = location.trim().to_string();
        }
        if let Some(bio) = update.bio {
            self.bio = Some(bio);
        }
        if let Some(photo) = update.photo {
            self.photo = Some(photo);
        }
        if let Some(phone) = update.phone_number {
            if self.phone_number.as_deref() != Some(phone.as_str()) {
                self.phone_number = Some(phone);
                self.phone_verified = false;
            }
        }

        self.updated_at = Timestamp::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    fn test_user() -> User {
        User::register(
            Email::parse("dana@example.com").unwrap(),
            "hash".to_string(),
            "Dana".to_string(),
            "Lyon".to_string(),
        )
        .unwrap()
    }

    #[test]
    fn register_sets_defaults() {
        let user = test_user();
        assert_eq!(user.name(), "Dana");
        assert_eq!(user.location(), "Lyon");
        assert!(!user.phone_verified());
        assert!(user.bio().is_none());
    }

    #[test]
    fn register_rejects_blank_name() {
        let result = User::register(
            Email::parse("dana@example.com").unwrap(),
            "hash".to_string(),
            "  ".to_string(),
            "Lyon".to_string(),
        );
        assert_eq!(result.unwrap_err().code, ErrorCode::EmptyField);
    }

    #[test]
    fn password_must_be_long_enough() {
        assert!(validate_password("12345").is_err());
        assert!(validate_password("123456").is_ok());
    }

    #[test]
    fn partial_update_only_touches_given_fields() {
        let mut user = test_user();
        user.update_profile(ProfileUpdate {
            bio: Some("Gardener".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(user.bio(), Some("Gardener"));
        assert_eq!(user.name(), "Dana");
        assert_eq!(user.location(), "Lyon");
    }

    #[test]
    fn changing_phone_resets_verification() {
        let mut user = User::reconstitute(
            UserId::new(),
            Email::parse("dana@example.com").unwrap(),
            "hash".to_string(),
            "Dana".to_string(),
            "Lyon".to_string(),
            None,
            None,
            Some("0600000000".to_string()),
            true,
            Timestamp::now(),
            Timestamp::now(),
        );

        user.update_profile(ProfileUpdate {
            phone_number: Some("0600000000".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert!(user.phone_verified());

        user.update_profile(ProfileUpdate {
            phone_number: Some("0611111111".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert!(!user.phone_verified());
        assert_eq!(user.phone_number(), Some("0611111111"));
    }

    #[test]
    fn invalid_update_changes_nothing() {
        let mut user = test_user();
        let result = user.update_profile(ProfileUpdate {
            bio: Some("ok".to_string()),
            name: Some(String::new()),
            ..Default::default()
        });
        assert!(result.is_err());
        assert!(user.bio().is_none());
    }
}
