//! Profile query and update handlers.
//!
//! A profile is the stored user plus two derived figures: the average rating
//! received and the number of completed exchanges on either side.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, DomainError, ErrorCode, UserId};
use crate::domain::user::{ProfileUpdate, User};
use crate::ports::{ExchangeRepository, ReviewRepository, UserRepository};

/// User with derived reputation figures.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub user: User,
    pub average_rating: f64,
    pub total_exchanges: u64,
}

/// Loads users and decorates them with their stats.
#[derive(Clone)]
pub struct ProfileReader {
    users: Arc<dyn UserRepository>,
    exchanges: Arc<dyn ExchangeRepository>,
    reviews: Arc<dyn ReviewRepository>,
}

impl ProfileReader {
    pub fn new(
        users: Arc<dyn UserRepository>,
        exchanges: Arc<dyn ExchangeRepository>,
        reviews: Arc<dyn ReviewRepository>,
    ) -> Self {
        Self {
            users,
            exchanges,
            reviews,
        }
    }

    pub async fn load(&self, user_id: &UserId) -> Result<UserProfile, DomainError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found(ErrorCode::UserNotFound, "User", user_id))?;
        self.decorate(user).await
    }

    async fn decorate(&self, user: User) -> Result<UserProfile, DomainError> {
        let average_rating = self.reviews.average_rating(user.id()).await?;
        let total_exchanges = self.exchanges.count_completed_for_user(user.id()).await?;
        Ok(UserProfile {
            user,
            average_rating,
            total_exchanges,
        })
    }
}

/// Query handler for the caller's own profile.
pub struct GetProfileHandler {
    reader: ProfileReader,
}

impl GetProfileHandler {
    pub fn new(reader: ProfileReader) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, metadata: CommandMetadata) -> Result<UserProfile, DomainError> {
        self.reader.load(&metadata.user_id).await
    }
}

/// Command to partially update the caller's profile.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileCommand {
    pub update: ProfileUpdate,
}

pub struct UpdateProfileHandler {
    users: Arc<dyn UserRepository>,
    reader: ProfileReader,
}

impl UpdateProfileHandler {
    pub fn new(users: Arc<dyn UserRepository>, reader: ProfileReader) -> Self {
        Self { users, reader }
    }

    pub async fn handle(
        &self,
        cmd: UpdateProfileCommand,
        metadata: CommandMetadata,
    ) -> Result<UserProfile, DomainError> {
        let mut user = self
            .users
            .find_by_id(&metadata.user_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(ErrorCode::UserNotFound, "User", metadata.user_id)
            })?;

        user.update_profile(cmd.update)?;
        self.users.update(&user).await?;

        tracing::info!(user_id = %user.id(), "Profile updated");
        self.reader.decorate(user).await
    }
}
