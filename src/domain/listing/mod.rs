//! Listing module - items and skills offered for exchange.

mod item;
mod listing_ref;
mod skill;

pub use item::{ItemDetails, ItemListing};
pub use listing_ref::ListingRef;
pub use skill::{SkillDetails, SkillListing};

pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;
pub const MAX_IMAGES_LENGTH: usize = 2000;
pub const MAX_EXCHANGE_PREFERENCE_LENGTH: usize = 500;
