//! Item listing aggregate: a physical object offered for exchange.

use crate::domain::foundation::{
    check_length, check_required, DomainError, ItemListingId, OwnedByUser, Timestamp, UserId,
};

use super::{
    MAX_DESCRIPTION_LENGTH, MAX_EXCHANGE_PREFERENCE_LENGTH, MAX_IMAGES_LENGTH, MAX_TITLE_LENGTH,
};

pub const MAX_CATEGORY_LENGTH: usize = 100;

/// Editable fields of an item listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDetails {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub images: Option<String>,
    pub exchange_preference: Option<String>,
}

impl ItemDetails {
    fn validate(&self) -> Result<(), DomainError> {
        check_required("title", &self.title, MAX_TITLE_LENGTH)?;
        check_required("category", &self.category, MAX_CATEGORY_LENGTH)?;
        if let Some(description) = &self.description {
            check_length("description", description, MAX_DESCRIPTION_LENGTH)?;
        }
        if let Some(images) = &self.images {
            check_length("images", images, MAX_IMAGES_LENGTH)?;
        }
        if let Some(pref) = &self.exchange_preference {
            check_length("exchange_preference", pref, MAX_EXCHANGE_PREFERENCE_LENGTH)?;
        }
        Ok(())
    }
}

/// Object listed by its owner.
///
/// # Invariants
///
/// - exactly one owner, never changes
/// - `title` and `category` are non-blank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemListing {
    id: ItemListingId,
    owner_id: UserId,
    details: ItemDetails,
    available: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl ItemListing {
    /// Creates a new, available item listing.
    pub fn new(owner_id: UserId, details: ItemDetails) -> Result<Self, DomainError> {
        details.validate()?;
        let now = Timestamp::now();
        Ok(Self {
            id: ItemListingId::new(),
            owner_id,
            details,
            available: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute from persistence (no validation).
    pub fn reconstitute(
        id: ItemListingId,
        owner_id: UserId,
        details: ItemDetails,
        available: bool,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            owner_id,
            details,
            available,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &ItemListingId {
        &self.id
    }

    pub fn details(&self) -> &ItemDetails {
        &self.details
    }

    pub fn title(&self) -> &str {
        &self.details.title
    }

    pub fn available(&self) -> bool {
        self.available
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Replaces the editable fields; `available` is kept when `None`.
    pub fn update(
        &mut self,
        details: ItemDetails,
        available: Option<bool>,
    ) -> Result<(), DomainError> {
        details.validate()?;
        self.details = details;
        if let Some(available) = available {
            self.available = available;
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

impl OwnedByUser for ItemListing {
    fn owner_id(&self) -> &UserId {
        &self.owner_id
    }
}
