//! HTTP handlers for the notification inbox.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::domain::foundation::NotificationId;

use super::dto::{MessageBody, NotificationResponse, UnreadCountResponse};

/// GET /api/notifications
pub async fn list(
    State(state): State<AppState>,
    auth: RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let notifications = state.notification_inbox().list(auth.metadata()).await?;
    Ok(Json(
        notifications
            .iter()
            .map(NotificationResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// GET /api/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let count = state
        .notification_inbox()
        .unread_count(auth.metadata())
        .await?;
    Ok(Json(UnreadCountResponse { count }))
}

/// PUT /api/notifications/:id/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<NotificationId>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .notification_inbox()
        .mark_read(&id, auth.metadata())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let updated = state
        .notification_inbox()
        .mark_all_read(auth.metadata())
        .await?;
    Ok(Json(MessageBody {
        message: format!("{} notification(s) marked as read", updated),
    }))
}
