//! Skill listing aggregate: a service a user offers for exchange.

use crate::domain::foundation::{
    check_length, check_required, DomainError, OwnedByUser, SkillListingId, Timestamp, UserId,
};

use super::{
    MAX_DESCRIPTION_LENGTH, MAX_EXCHANGE_PREFERENCE_LENGTH, MAX_IMAGES_LENGTH, MAX_TITLE_LENGTH,
};

pub const MAX_AVAILABILITY_LENGTH: usize = 500;

/// Editable fields of a skill listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillDetails {
    pub title: String,
    pub description: Option<String>,
    /// Free-text availability slots, e.g. "weekends".
    pub availability: String,
    pub images: Option<String>,
    pub exchange_preference: Option<String>,
}

impl SkillDetails {
    fn validate(&self) -> Result<(), DomainError> {
        check_required("title", &self.title, MAX_TITLE_LENGTH)?;
        check_required("availability", &self.availability, MAX_AVAILABILITY_LENGTH)?;
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

/// Skill offered by its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillListing {
    id: SkillListingId,
    owner_id: UserId,
    details: SkillDetails,
    active: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl SkillListing {
    /// Creates a new, active skill listing.
    pub fn new(owner_id: UserId, details: SkillDetails) -> Result<Self, DomainError> {
        details.validate()?;
        let now = Timestamp::now();
        Ok(Self {
            id: SkillListingId::new(),
            owner_id,
            details,
            active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute from persistence (no validation).
    pub fn reconstitute(
        id: SkillListingId,
        owner_id: UserId,
        details: SkillDetails,
        active: bool,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            owner_id,
            details,
            active,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &SkillListingId {
        &self.id
    }

    pub fn details(&self) -> &SkillDetails {
        &self.details
    }

    pub fn title(&self) -> &str {
        &self.details.title
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Replaces the editable fields; `active` is kept when `None`.
    pub fn update(&mut self, details: SkillDetails, active: Option<bool>) -> Result<(), DomainError> {
        details.validate()?;
        self.details = details;
        if let Some(active) = active {
            self.active = active;
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

impl OwnedByUser for SkillListing {
    fn owner_id(&self) -> &UserId {
        &self.owner_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    fn details() -> SkillDetails {
        SkillDetails {
            title: "Guitar lessons".to_string(),
            description: None,
            availability: "Weekends".to_string(),
            images: None,
            exchange_preference: Some("Vegetables".to_string()),
        }
    }

    #[test]
    fn new_skill_is_active() {
        let skill = SkillListing::new(UserId::new(), details()).unwrap();
        assert!(skill.active());
        assert_eq!(skill.title(), "Guitar lessons");
    }

    #[test]
    fn availability_is_required() {
        let mut d = details();
        d.availability = String::new();
        let err = SkillListing::new(UserId::new(), d).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyField);
    }

    #[test]
    fn update_can_deactivate() {
        let mut skill = SkillListing::new(UserId::new(), details()).unwrap();
        skill.update(details(), Some(false)).unwrap();
        assert!(!skill.active());
    }
}
