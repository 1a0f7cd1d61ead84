//! HTTP handlers for exchange requests.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::exchange::{ExchangeAction, TransitionExchangeCommand};
use crate::domain::exchange::ExchangeRequest;
use crate::domain::foundation::ExchangeId;

use super::dto::{CreateExchangeRequest, ExchangeResponse};

fn to_responses(exchanges: Vec<ExchangeRequest>) -> Vec<ExchangeResponse> {
    exchanges.iter().map(ExchangeResponse::from).collect()
}

/// POST /api/exchanges
pub async fn create_exchange(
    State(state): State<AppState>,
    auth: RequireAuth,
    Json(req): Json<CreateExchangeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let exchange = state
        .create_exchange_handler()
        .handle(req.into(), auth.metadata())
        .await?;
    Ok((StatusCode::CREATED, Json(ExchangeResponse::from(&exchange))))
}

/// GET /api/exchanges/received
pub async fn received(
    State(state): State<AppState>,
    auth: RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let exchanges = state.exchange_queries().received(auth.metadata()).await?;
    Ok(Json(to_responses(exchanges)))
}

/// GET /api/exchanges/sent
pub async fn sent(
    State(state): State<AppState>,
    auth: RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let exchanges = state.exchange_queries().sent(auth.metadata()).await?;
    Ok(Json(to_responses(exchanges)))
}

/// GET /api/exchanges/:id
pub async fn get_exchange(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<ExchangeId>,
) -> Result<impl IntoResponse, ApiError> {
    let exchange = state.exchange_queries().get(&id, auth.metadata()).await?;
    Ok(Json(ExchangeResponse::from(&exchange)))
}

async fn transition(
    state: AppState,
    auth: RequireAuth,
    exchange_id: ExchangeId,
    action: ExchangeAction,
) -> Result<Json<ExchangeResponse>, ApiError> {
    let cmd = TransitionExchangeCommand {
        exchange_id,
        action,
    };
    let exchange = state
        .transition_exchange_handler()
        .handle(cmd, auth.metadata())
        .await?;
    Ok(Json(ExchangeResponse::from(&exchange)))
}

/// PUT /api/exchanges/:id/accept
pub async fn accept(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<ExchangeId>,
) -> Result<impl IntoResponse, ApiError> {
    transition(state, auth, id, ExchangeAction::Accept).await
}

/// PUT /api/exchanges/:id/refuse
pub async fn refuse(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<ExchangeId>,
) -> Result<impl IntoResponse, ApiError> {
    transition(state, auth, id, ExchangeAction::Refuse).await
}

/// PUT /api/exchanges/:id/complete
pub async fn complete(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<ExchangeId>,
) -> Result<impl IntoResponse, ApiError> {
    transition(state, auth, id, ExchangeAction::Complete).await
}

/// PUT /api/exchanges/:id/cancel
pub async fn cancel(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<ExchangeId>,
) -> Result<impl IntoResponse, ApiError> {
    transition(state, auth, id, ExchangeAction::Cancel).await
}
