//! HTTP handlers for item and skill listings.
//!
//! Reads are public; every mutation requires a token and the handlers
//! underneath enforce ownership.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::listing::{
    CreateItemCommand, CreateSkillCommand, DeleteItemCommand, DeleteSkillCommand,
    UpdateItemCommand, UpdateSkillCommand,
};
use crate::domain::foundation::{ItemListingId, SkillListingId};

use super::dto::{ItemRequest, ItemResponse, ListingQuery, SkillRequest, SkillResponse};

// ════════════════════════════════════════════════════════════════════════════
// Items
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/items
pub async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state
        .item_queries()
        .search(&query.item_filter(), query.page_request())
        .await?;
    Ok(Json(page.map(ItemResponse::from)))
}

/// GET /api/items/my-items
pub async fn my_items(
    State(state): State<AppState>,
    auth: RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let items = state.item_queries().list_mine(auth.metadata()).await?;
    Ok(Json(
        items.into_iter().map(ItemResponse::from).collect::<Vec<_>>(),
    ))
}

/// GET /api/items/:id
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<ItemListingId>,
) -> Result<impl IntoResponse, ApiError> {
    let view = state.item_queries().get(&id).await?;
    Ok(Json(ItemResponse::from(view)))
}

/// POST /api/items
pub async fn create_item(
    State(state): State<AppState>,
    auth: RequireAuth,
    Json(req): Json<ItemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CreateItemCommand {
        details: req.details(),
    };
    let view = state
        .create_item_handler()
        .handle(cmd, auth.metadata())
        .await?;
    Ok((StatusCode::CREATED, Json(ItemResponse::from(view))))
}

/// PUT /api/items/:id
pub async fn update_item(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<ItemListingId>,
    Json(req): Json<ItemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = UpdateItemCommand {
        item_id: id,
        details: req.details(),
        available: req.available,
    };
    let view = state
        .update_item_handler()
        .handle(cmd, auth.metadata())
        .await?;
    Ok(Json(ItemResponse::from(view)))
}

/// DELETE /api/items/:id
pub async fn delete_item(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<ItemListingId>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .delete_item_handler()
        .handle(DeleteItemCommand { item_id: id }, auth.metadata())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ════════════════════════════════════════════════════════════════════════════
// Skills
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/skills
pub async fn list_skills(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state
        .skill_queries()
        .search(&query.skill_filter(), query.page_request())
        .await?;
    Ok(Json(page.map(SkillResponse::from)))
}

/// GET /api/skills/my-skills
pub async fn my_skills(
    State(state): State<AppState>,
    auth: RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let skills = state.skill_queries().list_mine(auth.metadata()).await?;
    Ok(Json(
        skills
            .into_iter()
            .map(SkillResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// GET /api/skills/:id
pub async fn get_skill(
    State(state): State<AppState>,
    Path(id): Path<SkillListingId>,
) -> Result<impl IntoResponse, ApiError> {
    let view = state.skill_queries().get(&id).await?;
    Ok(Json(SkillResponse::from(view)))
}

/// POST /api/skills
pub async fn create_skill(
    State(state): State<AppState>,
    auth: RequireAuth,
    Json(req): Json<SkillRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CreateSkillCommand {
        details: req.details(),
    };
    let view = state
        .create_skill_handler()
        .handle(cmd, auth.metadata())
        .await?;
    Ok((StatusCode::CREATED, Json(SkillResponse::from(view))))
}

/// PUT /api/skills/:id
pub async fn update_skill(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<SkillListingId>,
    Json(req): Json<SkillRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = UpdateSkillCommand {
        skill_id: id,
        details: req.details(),
        active: req.active,
    };
    let view = state
        .update_skill_handler()
        .handle(cmd, auth.metadata())
        .await?;
    Ok(Json(SkillResponse::from(view)))
}

/// DELETE /api/skills/:id
pub async fn delete_skill(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<SkillListingId>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .delete_skill_handler()
        .handle(DeleteSkillCommand { skill_id: id }, auth.metadata())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
