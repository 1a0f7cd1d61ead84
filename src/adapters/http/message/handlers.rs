//! HTTP handlers for conversation messages.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::messaging::{MarkMessageReadCommand, SendMessageCommand};
use crate::domain::foundation::{ExchangeId, MessageId};

use super::dto::{MessageResponse, SendMessageRequest};

/// POST /api/messages
pub async fn send_message(
    State(state): State<AppState>,
    auth: RequireAuth,
    Json(req): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = SendMessageCommand {
        exchange_id: req.exchange_id,
        content: req.content,
    };
    let message = state
        .send_message_handler()
        .handle(cmd, auth.metadata())
        .await?;
    Ok((StatusCode::CREATED, Json(MessageResponse::from(&message))))
}

/// GET /api/messages/conversation/:exchange_id
pub async fn conversation(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(exchange_id): Path<ExchangeId>,
) -> Result<impl IntoResponse, ApiError> {
    let messages = state
        .conversation_handler()
        .handle(&exchange_id, auth.metadata())
        .await?;
    Ok(Json(
        messages
            .iter()
            .map(MessageResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// PUT /api/messages/:id/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<MessageId>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .mark_message_read_handler()
        .handle(MarkMessageReadCommand { message_id: id }, auth.metadata())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
