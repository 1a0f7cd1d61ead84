//! Listing repository ports for items and skills.
//!
//! Both ports share the same shape: CRUD, a paged public search, and the
//! owner's own listings. Deleting a listing cascades to its exchange requests
//! (with their messages and reviews) inside a single transaction, and clears
//! notification deep links that pointed at any of them.

use crate::domain::foundation::{
    DomainError, ItemListingId, Page, PageRequest, SkillListingId, UserId,
};
use crate::domain::listing::{ItemListing, SkillListing};
use async_trait::async_trait;

/// Public item search criteria. Both are optional and combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    /// Exact category match.
    pub category: Option<String>,
    /// Case-insensitive substring of the title.
    pub search: Option<String>,
}

/// Public skill search criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillFilter {
    /// Case-insensitive substring of the title.
    pub search: Option<String>,
}

/// Repository port for item listings.
#[async_trait]
pub trait ItemListingRepository: Send + Sync {
    async fn save(&self, item: &ItemListing) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `ListingNotFound` if the item doesn't exist
    async fn update(&self, item: &ItemListing) -> Result<(), DomainError>;

    /// Delete the item and everything hanging off it.
    ///
    /// # Errors
    ///
    /// - `ListingNotFound` if the item doesn't exist
    async fn delete(&self, id: &ItemListingId) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &ItemListingId) -> Result<Option<ItemListing>, DomainError>;

    /// Paged search, newest first.
    async fn search(
        &self,
        filter: &ItemFilter,
        page: PageRequest,
    ) -> Result<Page<ItemListing>, DomainError>;

    /// All items of one owner, newest first.
    async fn list_by_owner(&self, owner_id: &UserId) -> Result<Vec<ItemListing>, DomainError>;
}

/// Repository port for skill listings.
#[async_trait]
pub trait SkillListingRepository: Send + Sync {
    async fn save(&self, skill: &SkillListing) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `ListingNotFound` if the skill doesn't exist
    async fn update(&self, skill: &SkillListing) -> Result<(), DomainError>;

    /// Delete the skill and everything hanging off it.
    async fn delete(&self, id: &SkillListingId) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &SkillListingId)
        -> Result<Option<SkillListing>, DomainError>;

    /// Paged search, newest first.
    async fn search(
        &self,
        filter: &SkillFilter,
        page: PageRequest,
    ) -> Result<Page<SkillListing>, DomainError>;

    /// All skills of one owner, newest first.
    async fn list_by_owner(&self, owner_id: &UserId) -> Result<Vec<SkillListing>, DomainError>;
}
