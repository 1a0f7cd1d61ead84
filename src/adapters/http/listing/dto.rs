//! HTTP DTOs for item and skill listings.

use serde::{Deserialize, Serialize};

use crate::application::handlers::listing::{ItemView, OwnerSummary, SkillView};
use crate::domain::foundation::{
    ItemListingId, OwnedByUser, PageRequest, SkillListingId, Timestamp, UserId,
};
use crate::domain::listing::{ItemDetails, SkillDetails};
use crate::ports::{ItemFilter, SkillFilter};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Query string of the public listing search.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl ListingQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(
            self.page.unwrap_or(0),
            self.size.unwrap_or(PageRequest::DEFAULT_SIZE),
        )
    }

    pub fn item_filter(&self) -> ItemFilter {
        ItemFilter {
            category: non_blank(&self.category),
            search: non_blank(&self.search),
        }
    }

    /// Skills are searched by title only; `category` is ignored.
    pub fn skill_filter(&self) -> SkillFilter {
        SkillFilter {
            search: non_blank(&self.search),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemRequest {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub images: Option<String>,
    pub exchange_preference: Option<String>,
    pub available: Option<bool>,
}

impl ItemRequest {
    pub fn details(&self) -> ItemDetails {
        ItemDetails {
            title: self.title.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            images: self.images.clone(),
            exchange_preference: self.exchange_preference.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkillRequest {
    pub title: String,
    pub description: Option<String>,
    pub availability: String,
    pub images: Option<String>,
    pub exchange_preference: Option<String>,
    pub active: Option<bool>,
}

impl SkillRequest {
    pub fn details(&self) -> SkillDetails {
        SkillDetails {
            title: self.title.clone(),
            description: self.description.clone(),
            availability: self.availability.clone(),
            images: self.images.clone(),
            exchange_preference: self.exchange_preference.clone(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct OwnerResponse {
    pub id: UserId,
    pub name: String,
    pub photo: Option<String>,
    pub location: String,
    pub average_rating: f64,
}

impl From<OwnerSummary> for OwnerResponse {
    fn from(owner: OwnerSummary) -> Self {
        Self {
            id: owner.id,
            name: owner.name,
            photo: owner.photo,
            location: owner.location,
            average_rating: owner.average_rating,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemResponse {
    pub id: ItemListingId,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub images: Option<String>,
    pub exchange_preference: Option<String>,
    pub available: bool,
    pub owner_id: UserId,
    pub owner: OwnerResponse,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ItemView> for ItemResponse {
    fn from(view: ItemView) -> Self {
        let ItemView { item, owner } = view;
        let details = item.details().clone();
        Self {
            id: *item.id(),
            title: details.title,
            description: details.description,
            category: details.category,
            images: details.images,
            exchange_preference: details.exchange_preference,
            available: item.available(),
            owner_id: *item.owner_id(),
            owner: owner.into(),
            created_at: *item.created_at(),
            updated_at: *item.updated_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillResponse {
    pub id: SkillListingId,
    pub title: String,
    pub description: Option<String>,
    pub availability: String,
    pub images: Option<String>,
    pub exchange_preference: Option<String>,
    pub active: bool,
    pub owner_id: UserId,
    pub owner: OwnerResponse,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<SkillView> for SkillResponse {
    fn from(view: SkillView) -> Self {
        let SkillView { skill, owner } = view;
        let details = skill.details().clone();
        Self {
            id: *skill.id(),
            title: details.title,
            description: details.description,
            availability: details.availability,
            images: details.images,
            exchange_preference: details.exchange_preference,
            active: skill.active(),
            owner_id: *skill.owner_id(),
            owner: owner.into(),
            created_at: *skill.created_at(),
            updated_at: *skill.updated_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_defaults_to_first_page_of_twelve() {
        let query = ListingQuery::default();
        assert_eq!(query.page_request(), PageRequest::new(0, 12));
    }

    #[test]
    fn oversized_pages_are_clamped() {
        let query = ListingQuery {
            size: Some(5000),
            ..Default::default()
        };
        assert_eq!(query.page_request().size, PageRequest::MAX_SIZE);
    }

    #[test]
    fn blank_filters_are_dropped() {
        let query = ListingQuery {
            category: Some("  ".into()),
            search: Some(" drill ".into()),
            ..Default::default()
        };
        let filter = query.item_filter();
        assert_eq!(filter.category, None);
        assert_eq!(filter.search.as_deref(), Some("drill"));
    }
}
