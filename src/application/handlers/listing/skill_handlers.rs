//! Skill listing command and query handlers.

use std::sync::Arc;

use crate::domain::foundation::{
    CommandMetadata, DomainError, ErrorCode, OwnedByUser, Page, PageRequest, SkillListingId,
    UserId,
};
use crate::domain::listing::{SkillDetails, SkillListing};
use crate::ports::{SkillFilter, SkillListingRepository};

use super::{OwnerDirectory, OwnerSummary};

/// Skill together with its owner's public card.
#[derive(Debug, Clone)]
pub struct SkillView {
    pub skill: SkillListing,
    pub owner: OwnerSummary,
}

fn skill_not_found(id: &SkillListingId) -> DomainError {
    DomainError::not_found(ErrorCode::ListingNotFound, "Skill listing", id)
}

async fn load_owned(
    repo: &dyn SkillListingRepository,
    id: &SkillListingId,
    actor: &UserId,
) -> Result<SkillListing, DomainError> {
    let skill = repo.find_by_id(id).await?.ok_or_else(|| skill_not_found(id))?;
    skill.check_ownership(actor)?;
    Ok(skill)
}

#[derive(Debug, Clone)]
pub struct CreateSkillCommand {
    pub details: SkillDetails,
}

pub struct CreateSkillHandler {
    skills: Arc<dyn SkillListingRepository>,
    owners: OwnerDirectory,
}

impl CreateSkillHandler {
    pub fn new(skills: Arc<dyn SkillListingRepository>, owners: OwnerDirectory) -> Self {
        Self { skills, owners }
    }

    pub async fn handle(
        &self,
        cmd: CreateSkillCommand,
        metadata: CommandMetadata,
    ) -> Result<SkillView, DomainError> {
        let owner = self.owners.summary(&metadata.user_id).await?;
        let skill = SkillListing::new(metadata.user_id, cmd.details)?;
        self.skills.save(&skill).await?;

        tracing::info!(skill_id = %skill.id(), owner_id = %metadata.user_id, "Skill listed");
        Ok(SkillView { skill, owner })
    }
}

#[derive(Debug, Clone)]
pub struct UpdateSkillCommand {
    pub skill_id: SkillListingId,
    pub details: SkillDetails,
    pub active: Option<bool>,
}

pub struct UpdateSkillHandler {
    skills: Arc<dyn SkillListingRepository>,
    owners: OwnerDirectory,
}

impl UpdateSkillHandler {
    pub fn new(skills: Arc<dyn SkillListingRepository>, owners: OwnerDirectory) -> Self {
        Self { skills, owners }
    }

    pub async fn handle(
        &self,
        cmd: UpdateSkillCommand,
        metadata: CommandMetadata,
    ) -> Result<SkillView, DomainError> {
        let mut skill =
            load_owned(self.skills.as_ref(), &cmd.skill_id, &metadata.user_id).await?;
        skill.update(cmd.details, cmd.active)?;
        self.skills.update(&skill).await?;

        tracing::info!(skill_id = %skill.id(), "Skill updated");
        let owner = self.owners.summary(skill.owner_id()).await?;
        Ok(SkillView { skill, owner })
    }
}

#[derive(Debug, Clone)]
pub struct DeleteSkillCommand {
    pub skill_id: SkillListingId,
}

pub struct DeleteSkillHandler {
    skills: Arc<dyn SkillListingRepository>,
}

impl DeleteSkillHandler {
    pub fn new(skills: Arc<dyn SkillListingRepository>) -> Self {
        Self { skills }
    }

    pub async fn handle(
        &self,
        cmd: DeleteSkillCommand,
        metadata: CommandMetadata,
    ) -> Result<(), DomainError> {
        load_owned(self.skills.as_ref(), &cmd.skill_id, &metadata.user_id).await?;
        self.skills.delete(&cmd.skill_id).await?;

        tracing::info!(skill_id = %cmd.skill_id, "Skill deleted");
        Ok(())
    }
}

pub struct SkillQueryHandler {
    skills: Arc<dyn SkillListingRepository>,
    owners: OwnerDirectory,
}

impl SkillQueryHandler {
    pub fn new(skills: Arc<dyn SkillListingRepository>, owners: OwnerDirectory) -> Self {
        Self { skills, owners }
    }

    pub async fn get(&self, id: &SkillListingId) -> Result<SkillView, DomainError> {
        let skill = self
            .skills
            .find_by_id(id)
            .await?
            .ok_or_else(|| skill_not_found(id))?;
        let owner = self.owners.summary(skill.owner_id()).await?;
        Ok(SkillView { skill, owner })
    }

    pub async fn search(
        &self,
        filter: &SkillFilter,
        page: PageRequest,
    ) -> Result<Page<SkillView>, DomainError> {
        let found = self.skills.search(filter, page).await?;
        let owner_ids: Vec<UserId> = found.items.iter().map(|s| *s.owner_id()).collect();
        let owners = self.owners.summaries(&owner_ids).await?;
        found.try_map(|skill| {
            let owner = OwnerDirectory::pick(&owners, skill.owner_id())?;
            Ok(SkillView { skill, owner })
        })
    }

    pub async fn list_mine(
        &self,
        metadata: CommandMetadata,
    ) -> Result<Vec<SkillView>, DomainError> {
        let owner = self.owners.summary(&metadata.user_id).await?;
        let skills = self.skills.list_by_owner(&metadata.user_id).await?;
        Ok(skills
            .into_iter()
            .map(|skill| SkillView {
                skill,
                owner: owner.clone(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::foundation::ErrorKind;

    fn owners(fx: &Fixture) -> OwnerDirectory {
        OwnerDirectory::new(fx.users(), fx.reviews())
    }

    #[tokio::test]
    async fn create_requires_availability() {
        let fx = Fixture::new();
        let ann = fx.user("Ann").await;

        let err = CreateSkillHandler::new(fx.skills(), owners(&fx))
            .handle(
                CreateSkillCommand {
                    details: SkillDetails {
                        title: "Knitting".into(),
                        description: None,
                        availability: "".into(),
                        images: None,
                        exchange_preference: None,
                    },
                },
                CommandMetadata::new(*ann.id()),
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[tokio::test]
    async fn delete_by_owner_removes_skill() {
        let fx = Fixture::new();
        let ann = fx.user("Ann").await;
        let skill = fx.skill_for(&ann).await;

        DeleteSkillHandler::new(fx.skills())
            .handle(
                DeleteSkillCommand {
                    skill_id: *skill.id(),
                },
                CommandMetadata::new(*ann.id()),
            )
            .await
            .unwrap();

        let err = SkillQueryHandler::new(fx.skills(), owners(&fx))
            .get(skill.id())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn search_matches_title_only() {
        let fx = Fixture::new();
        let ann = fx.user("Ann").await;
        fx.skill_for(&ann).await;
        let queries = SkillQueryHandler::new(fx.skills(), owners(&fx));

        let hit = queries
            .search(
                &SkillFilter {
                    search: Some("bike".into()),
                },
                PageRequest::default(),
            )
            .await
            .unwrap();
        let miss = queries
            .search(
                &SkillFilter {
                    search: Some("saturday".into()),
                },
                PageRequest::default(),
            )
            .await
            .unwrap();

        assert_eq!(hit.total, 1);
        assert_eq!(miss.total, 0);
    }

    #[tokio::test]
    async fn search_runs_on_a_spawned_task() {
        let fx = Fixture::new();
        let ann = fx.user("Ann").await;
        let bob = fx.user("Bob").await;
        fx.skill_for(&ann).await;
        fx.skill_for(&bob).await;
        let queries = SkillQueryHandler::new(fx.skills(), owners(&fx));

        let page = tokio::spawn(async move {
            queries
                .search(&SkillFilter::default(), PageRequest::default())
                .await
        })
        .await
        .unwrap()
        .unwrap();

        let mut names: Vec<_> = page.items.iter().map(|v| v.owner.name.clone()).collect();
        names.sort();
        assert_eq!(names, ["Ann", "Bob"]);
    }
}
