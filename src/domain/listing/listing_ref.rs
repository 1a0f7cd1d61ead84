//! Reference to the listing an exchange request is about.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{DomainError, ErrorCode, ItemListingId, SkillListingId};

/// Exactly one item or one skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum ListingRef {
    Item(ItemListingId),
    Skill(SkillListingId),
}

impl ListingRef {
    /// Builds a reference from the two optional ids of a request payload.
    ///
    /// # Errors
    ///
    /// - `InvalidListingReference` if neither or both ids are given
    pub fn from_parts(
        item: Option<ItemListingId>,
        skill: Option<SkillListingId>,
    ) -> Result<Self, DomainError> {
        match (item, skill) {
            (Some(item), None) => Ok(ListingRef::Item(item)),
            (None, Some(skill)) => Ok(ListingRef::Skill(skill)),
            (None, None) => Err(DomainError::new(
                ErrorCode::InvalidListingReference,
                "An item or a skill listing must be referenced",
            )),
            (Some(_), Some(_)) => Err(DomainError::new(
                ErrorCode::InvalidListingReference,
                "Reference either an item or a skill listing, not both",
            )),
        }
    }

    pub fn item_id(&self) -> Option<ItemListingId> {
        match self {
            ListingRef::Item(id) => Some(*id),
            ListingRef::Skill(_) => None,
        }
    }

    pub fn skill_id(&self) -> Option<SkillListingId> {
        match self {
            ListingRef::Skill(id) => Some(*id),
            ListingRef::Item(_) => None,
        }
    }
}

impl fmt::Display for ListingRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingRef::Item(id) => write!(f, "item:{}", id),
            ListingRef::Skill(id) => write!(f, "skill:{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_only_builds_item_ref() {
        let id = ItemListingId::new();
        let listing = ListingRef::from_parts(Some(id), None).unwrap();
        assert_eq!(listing, ListingRef::Item(id));
        assert_eq!(listing.item_id(), Some(id));
        assert_eq!(listing.skill_id(), None);
    }

    #[test]
    fn skill_only_builds_skill_ref() {
        let id = SkillListingId::new();
        let listing = ListingRef::from_parts(None, Some(id)).unwrap();
        assert_eq!(listing.skill_id(), Some(id));
    }

    #[test]
    fn neither_is_rejected() {
        let err = ListingRef::from_parts(None, None).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidListingReference);
    }

    #[test]
    fn both_is_rejected() {
        let err =
            ListingRef::from_parts(Some(ItemListingId::new()), Some(SkillListingId::new()))
                .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidListingReference);
    }

    #[test]
    fn serializes_as_tagged_union() {
        let id = SkillListingId::new();
        let json = serde_json::to_value(ListingRef::Skill(id)).unwrap();
        assert_eq!(json["type"], "skill");
        assert_eq!(json["id"], id.to_string());
    }
}
