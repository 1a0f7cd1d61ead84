//! Item and skill listing endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{ItemResponse, OwnerResponse, SkillResponse};
pub use routes::{item_routes, skill_routes};
