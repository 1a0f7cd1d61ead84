//! HTTP handlers for reviews.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::review::CreateReviewCommand;
use crate::domain::foundation::UserId;

use super::dto::{AverageRatingResponse, CreateReviewRequest, ReviewResponse};

/// POST /api/reviews
pub async fn create_review(
    State(state): State<AppState>,
    auth: RequireAuth,
    Json(req): Json<CreateReviewRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CreateReviewCommand {
        exchange_id: req.exchange_id,
        rating: req.rating,
        comment: req.comment,
    };
    let review = state
        .create_review_handler()
        .handle(cmd, auth.metadata())
        .await?;
    Ok((StatusCode::CREATED, Json(ReviewResponse::from(&review))))
}

/// GET /api/reviews/user/:id
pub async fn reviews_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<impl IntoResponse, ApiError> {
    let reviews = state.review_queries().list_for_user(&user_id).await?;
    Ok(Json(
        reviews.iter().map(ReviewResponse::from).collect::<Vec<_>>(),
    ))
}

/// GET /api/reviews/user/:id/average
pub async fn average_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<impl IntoResponse, ApiError> {
    let average = state.review_queries().average_rating(&user_id).await?;
    Ok(Json(AverageRatingResponse { user_id, average }))
}
