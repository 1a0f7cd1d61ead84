//! Item listing command and query handlers.

use std::sync::Arc;

use crate::domain::foundation::{
    CommandMetadata, DomainError, ErrorCode, ItemListingId, OwnedByUser, Page, PageRequest,
    UserId,
};
use crate::domain::listing::{ItemDetails, ItemListing};
use crate::ports::{ItemFilter, ItemListingRepository};

use super::{OwnerDirectory, OwnerSummary};

/// Item together with its owner's public card.
#[derive(Debug, Clone)]
pub struct ItemView {
    pub item: ItemListing,
    pub owner: OwnerSummary,
}

fn item_not_found(id: &ItemListingId) -> DomainError {
    DomainError::not_found(ErrorCode::ListingNotFound, "Item listing", id)
}

async fn load_owned(
    repo: &dyn ItemListingRepository,
    id: &ItemListingId,
    actor: &UserId,
) -> Result<ItemListing, DomainError> {
    let item = repo.find_by_id(id).await?.ok_or_else(|| item_not_found(id))?;
    item.check_ownership(actor)?;
    Ok(item)
}

// ─────────────────────────────────────────────────────────────────────────────
// Commands
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct CreateItemCommand {
    pub details: ItemDetails,
}

pub struct CreateItemHandler {
    items: Arc<dyn ItemListingRepository>,
    owners: OwnerDirectory,
}

impl CreateItemHandler {
    pub fn new(items: Arc<dyn ItemListingRepository>, owners: OwnerDirectory) -> Self {
        Self { items, owners }
    }

    pub async fn handle(
        &self,
        cmd: CreateItemCommand,
        metadata: CommandMetadata,
    ) -> Result<ItemView, DomainError> {
        let owner = self.owners.summary(&metadata.user_id).await?;
        let item = ItemListing::new(metadata.user_id, cmd.details)?;
        self.items.save(&item).await?;

        tracing::info!(item_id = %item.id(), owner_id = %metadata.user_id, "Item listed");
        Ok(ItemView { item, owner })
    }
}

#[derive(Debug, Clone)]
pub struct UpdateItemCommand {
    pub item_id: ItemListingId,
    pub details: ItemDetails,
    pub available: Option<bool>,
}

pub struct UpdateItemHandler {
    items: Arc<dyn ItemListingRepository>,
    owners: OwnerDirectory,
}

impl UpdateItemHandler {
    pub fn new(items: Arc<dyn ItemListingRepository>, owners: OwnerDirectory) -> Self {
        Self { items, owners }
    }

    pub async fn handle(
        &self,
        cmd: UpdateItemCommand,
        metadata: CommandMetadata,
    ) -> Result<ItemView, DomainError> {
        let mut item = load_owned(self.items.as_ref(), &cmd.item_id, &metadata.user_id).await?;
        item.update(cmd.details, cmd.available)?;
        self.items.update(&item).await?;

        tracing::info!(item_id = %item.id(), "Item updated");
        let owner = self.owners.summary(item.owner_id()).await?;
        Ok(ItemView { item, owner })
    }
}

#[derive(Debug, Clone)]
pub struct DeleteItemCommand {
    pub item_id: ItemListingId,
}

pub struct DeleteItemHandler {
    items: Arc<dyn ItemListingRepository>,
}

impl DeleteItemHandler {
    pub fn new(items: Arc<dyn ItemListingRepository>) -> Self {
        Self { items }
    }

    /// Removes the item along with its exchange requests.
    pub async fn handle(
        &self,
        cmd: DeleteItemCommand,
        metadata: CommandMetadata,
    ) -> Result<(), DomainError> {
        load_owned(self.items.as_ref(), &cmd.item_id, &metadata.user_id).await?;
        self.items.delete(&cmd.item_id).await?;

        tracing::info!(item_id = %cmd.item_id, "Item deleted");
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Queries
// ─────────────────────────────────────────────────────────────────────────────

pub struct ItemQueryHandler {
    items: Arc<dyn ItemListingRepository>,
    owners: OwnerDirectory,
}

impl ItemQueryHandler {
    pub fn new(items: Arc<dyn ItemListingRepository>, owners: OwnerDirectory) -> Self {
        Self { items, owners }
    }

    pub async fn get(&self, id: &ItemListingId) -> Result<ItemView, DomainError> {
        let item = self
            .items
            .find_by_id(id)
            .await?
            .ok_or_else(|| item_not_found(id))?;
        let owner = self.owners.summary(item.owner_id()).await?;
        Ok(ItemView { item, owner })
    }

    pub async fn search(
        &self,
        filter: &ItemFilter,
        page: PageRequest,
    ) -> Result<Page<ItemView>, DomainError> {
        let found = self.items.search(filter, page).await?;
        let owner_ids: Vec<UserId> = found.items.iter().map(|i| *i.owner_id()).collect();
        let owners = self.owners.summaries(&owner_ids).await?;
        found.try_map(|item| {
            let owner = OwnerDirectory::pick(&owners, item.owner_id())?;
            Ok(ItemView { item, owner })
        })
    }

    pub async fn list_mine(&self, metadata: CommandMetadata) -> Result<Vec<ItemView>, DomainError> {
        let owner = self.owners.summary(&metadata.user_id).await?;
        let items = self.items.list_by_owner(&metadata.user_id).await?;
        Ok(items
            .into_iter()
            .map(|item| ItemView {
                item,
                owner: owner.clone(),
            })
            .collect())
    }
}
