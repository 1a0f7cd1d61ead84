//! HTTP routes for listings.

use axum::{routing::get, Router};

use super::handlers::{
    create_item, create_skill, delete_item, delete_skill, get_item, get_skill, list_items,
    list_skills, my_items, my_skills, update_item, update_skill,
};
use crate::adapters::http::state::AppState;

/// Routes mounted under `/api/items`.
pub fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/my-items", get(my_items))
        .route("/:id", get(get_item).put(update_item).delete(delete_item))
}

/// Routes mounted under `/api/skills`.
pub fn skill_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_skills).post(create_skill))
        .route("/my-skills", get(my_skills))
        .route("/:id", get(get_skill).put(update_skill).delete(delete_skill))
}
