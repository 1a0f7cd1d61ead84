//! Public owner card shown next to every listing.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::{ReviewRepository, UserRepository};

#[derive(Debug, Clone, PartialEq)]
pub struct OwnerSummary {
    pub id: UserId,
    pub name: String,
    pub photo: Option<String>,
    pub location: String,
    pub average_rating: f64,
}

/// Resolves owner summaries, memoizing within one request.
#[derive(Clone)]
pub struct OwnerDirectory {
    users: Arc<dyn UserRepository>,
    reviews: Arc<dyn ReviewRepository>,
}

impl OwnerDirectory {
    pub fn new(users: Arc<dyn UserRepository>, reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { users, reviews }
    }

    pub async fn summary(&self, owner_id: &UserId) -> Result<OwnerSummary, DomainError> {
        let user = self
            .users
            .find_by_id(owner_id)
            .await?
            .ok_or_else(|| DomainError::not_found(ErrorCode::UserNotFound, "User", owner_id))?;
        let average_rating = self.reviews.average_rating(owner_id).await?;
        Ok(OwnerSummary {
            id: *user.id(),
            name: user.name().to_string(),
            photo: user.photo().map(str::to_string),
            location: user.location().to_string(),
            average_rating,
        })
    }

    /// Summaries for a batch of owners, each looked up once.
    pub async fn summaries(
        &self,
        owner_ids: &[UserId],
    ) -> Result<HashMap<UserId, OwnerSummary>, DomainError> {
        let mut found = HashMap::new();
        for id in owner_ids {
            if !found.contains_key(id) {
                found.insert(*id, self.summary(id).await?);
            }
        }
        Ok(found)
    }

    /// Takes one summary out of a batch returned by [`Self::summaries`].
    pub fn pick(
        batch: &HashMap<UserId, OwnerSummary>,
        owner_id: &UserId,
    ) -> Result<OwnerSummary, DomainError> {
        batch
            .get(owner_id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(ErrorCode::UserNotFound, "User", owner_id))
    }
}
