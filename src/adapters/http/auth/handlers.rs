//! HTTP handlers for registration, login and the caller's profile.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::auth::{
    LoginCommand, RegisterUserCommand, UpdateProfileCommand,
};

use super::dto::{
    LoginRequest, LoginResponse, ProfileResponse, RegisterRequest, UpdateProfileRequest,
    UserResponse,
};

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = RegisterUserCommand {
        email: req.email,
        password: req.password,
        name: req.name,
        location: req.location,
    };
    let user = state.register_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = LoginCommand {
        email: req.email,
        password: req.password,
    };
    let result = state.login_handler().handle(cmd).await?;
    Ok(Json(LoginResponse::from(result)))
}

/// GET /api/auth/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth: RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state.get_profile_handler().handle(auth.metadata()).await?;
    Ok(Json(ProfileResponse::from(profile)))
}

/// PUT /api/auth/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: RequireAuth,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = UpdateProfileCommand {
        update: req.into(),
    };
    let profile = state
        .update_profile_handler()
        .handle(cmd, auth.metadata())
        .await?;
    Ok(Json(ProfileResponse::from(profile)))
}
