//! Listing command and query handlers for items and skills.

mod item_handlers;
mod owner_summary;
mod skill_handlers;

pub use item_handlers::{
    CreateItemCommand, CreateItemHandler, DeleteItemCommand, DeleteItemHandler, ItemQueryHandler,
    ItemView, UpdateItemCommand, UpdateItemHandler,
};
pub use owner_summary::{OwnerDirectory, OwnerSummary};
pub use skill_handlers::{
    CreateSkillCommand, CreateSkillHandler, DeleteSkillCommand, DeleteSkillHandler,
    SkillQueryHandler, SkillView, UpdateSkillCommand, UpdateSkillHandler,
};
