//! HTTP DTOs for registration, login and profile endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::auth::{LoginResult, UserProfile};
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::user::{ProfileUpdate, User};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub photo: Option<String>,
    pub phone_number: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(req: UpdateProfileRequest) -> Self {
        ProfileUpdate {
            name: req.name,
            location: req.location,
            bio: req.bio,
            photo: req.photo,
            phone_number: req.phone_number,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Public account view. Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub location: String,
    pub bio: Option<String>,
    pub photo: Option<String>,
    pub phone_number: Option<String>,
    pub phone_verified: bool,
    pub created_at: Timestamp,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: *user.id(),
            email: user.email().as_str().to_string(),
            name: user.name().to_string(),
            location: user.location().to_string(),
            bio: user.bio().map(str::to_string),
            photo: user.photo().map(str::to_string),
            phone_number: user.phone_number().map(str::to_string),
            phone_verified: user.phone_verified(),
            created_at: *user.created_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub average_rating: f64,
    pub total_exchanges: u64,
}

impl From<UserProfile> for ProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            user: UserResponse::from(&profile.user),
            average_rating: profile.average_rating,
            total_exchanges: profile.total_exchanges,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: Timestamp,
    pub user: UserResponse,
}

impl From<LoginResult> for LoginResponse {
    fn from(result: LoginResult) -> Self {
        Self {
            token: result.token.token,
            expires_at: result.token.expires_at,
            user: UserResponse::from(&result.user),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::Email;

    #[test]
    fn user_response_omits_password_hash() {
        let user = User::register(
            Email::parse("ann@example.com").unwrap(),
            "argon-secret-hash".to_string(),
            "Ann".to_string(),
            "Lyon".to_string(),
        )
        .unwrap();

        let json = serde_json::to_string(&UserResponse::from(&user)).unwrap();

        assert!(json.contains("ann@example.com"));
        assert!(!json.contains("argon-secret-hash"));
    }

    #[test]
    fn register_location_defaults_to_empty() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"email":"a@b.io","password":"secret1","name":"Ann"}"#,
        )
        .unwrap();
        assert_eq!(req.location, "");
    }
}
