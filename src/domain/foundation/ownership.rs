//! Ownership trait for user-owned resources.
//!
//! Listings implement `OwnedByUser`; handlers call `check_ownership`
//! before any owner-only mutation.
//!
//! ```ignore
//! let item = repo.find_by_id(&id).await?.ok_or_else(...)?;
//! item.check_ownership(&metadata.user_id)?; // Err(Forbidden) if not owner
//! ```

use super::{DomainError, ErrorCode, UserId};

/// Trait for aggregates that have a single owner.
pub trait OwnedByUser {
    /// Returns the ID of the user who owns this resource.
    fn owner_id(&self) -> &UserId;

    /// Checks if the given user is the owner.
    fn is_owner(&self, user_id: &UserId) -> bool {
        self.owner_id() == user_id
    }

    /// Validates ownership, returning a `Forbidden` error if the user is not the owner.
    fn check_ownership(&self, user_id: &UserId) -> Result<(), DomainError> {
        if self.is_owner(user_id) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "User does not own this resource",
            )
            .with_detail("owner_id", self.owner_id().to_string())
            .with_detail("requested_by", user_id.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorKind;

    struct Shelf {
        owner: UserId,
    }

    impl OwnedByUser for Shelf {
        fn owner_id(&self) -> &UserId {
            &self.owner
        }
    }

    #[test]
    fn owner_passes_check() {
        let owner = UserId::new();
        let shelf = Shelf { owner };
        assert!(shelf.is_owner(&owner));
        assert!(shelf.check_ownership(&owner).is_ok());
    }

    #[test]
    fn stranger_is_rejected_with_details() {
        let owner = UserId::new();
        let stranger = UserId::new();
        let shelf = Shelf { owner };

        let err = shelf.check_ownership(&stranger).unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert_eq!(err.details.get("owner_id"), Some(&owner.to_string()));
        assert_eq!(err.details.get("requested_by"), Some(&stranger.to_string()));
    }
}
