use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::Tables;
use crate::domain::foundation::{
    DomainError, ErrorCode, ItemListingId, OwnedByUser, Page, PageRequest, SkillListingId,
    UserId,
};
use crate::domain::listing::{ItemListing, ListingRef, SkillListing};
use crate::ports::{ItemFilter, ItemListingRepository, SkillFilter, SkillListingRepository};

fn title_matches(title: &str, search: Option<&str>) -> bool {
    match search {
        Some(needle) => title.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}

fn paginate<T: Clone>(newest_first: Vec<&T>, request: PageRequest) -> Page<T> {
    let total = newest_first.len() as u64;
    let items = newest_first
        .into_iter()
        .skip(request.offset() as usize)
        .take(request.limit() as usize)
        .cloned()
        .collect();
    Page::new(items, total, request)
}

fn listing_not_found(id: impl std::fmt::Display) -> DomainError {
    DomainError::not_found(ErrorCode::ListingNotFound, "Listing", id)
}

// ─────────────────────────────────────────────────────────────────────────────
// Items
// ─────────────────────────────────────────────────────────────────────────────

pub struct InMemoryItemListingRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryItemListingRepository {
    pub(crate) fn new(tables: Arc<RwLock<Tables>>) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl ItemListingRepository for InMemoryItemListingRepository {
    async fn save(&self, item: &ItemListing) -> Result<(), DomainError> {
        self.tables.write().await.items.push(item.clone());
        Ok(())
    }

    async fn update(&self, item: &ItemListing) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let slot = tables
            .items
            .iter_mut()
            .find(|i| i.id() == item.id())
            .ok_or_else(|| listing_not_found(item.id()))?;
        *slot = item.clone();
        Ok(())
    }

    async fn delete(&self, id: &ItemListingId) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let before = tables.items.len();
        tables.items.retain(|i| i.id() != id);
        if tables.items.len() == before {
            return Err(listing_not_found(id));
        }
        tables.cascade_listing(&ListingRef::Item(*id));
        Ok(())
    }

    async fn find_by_id(&self, id: &ItemListingId) -> Result<Option<ItemListing>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.items.iter().find(|i| i.id() == id).cloned())
    }

    async fn search(
        &self,
        filter: &ItemFilter,
        page: PageRequest,
    ) -> Result<Page<ItemListing>, DomainError> {
        let tables = self.tables.read().await;
        let matches = tables
            .items
            .iter()
            .rev()
            .filter(|i| {
                filter
                    .category
                    .as_deref()
                    .map_or(true, |c| i.details().category == c)
            })
            .filter(|i| title_matches(i.title(), filter.search.as_deref()))
            .collect();
        Ok(paginate(matches, page))
    }

    async fn list_by_owner(&self, owner_id: &UserId) -> Result<Vec<ItemListing>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .items
            .iter()
            .rev()
            .filter(|i| i.owner_id() == owner_id)
            .cloned()
            .collect())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Skills
// ─────────────────────────────────────────────────────────────────────────────

pub struct InMemorySkillListingRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemorySkillListingRepository {
    pub(crate) fn new(tables: Arc<RwLock<Tables>>) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl SkillListingRepository for InMemorySkillListingRepository {
    async fn save(&self, skill: &SkillListing) -> Result<(), DomainError> {
        self.tables.write().await.skills.push(skill.clone());
        Ok(())
    }

    async fn update(&self, skill: &SkillListing) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let slot = tables
            .skills
            .iter_mut()
            .find(|s| s.id() == skill.id())
            .ok_or_else(|| listing_not_found(skill.id()))?;
        *slot = skill.clone();
        Ok(())
    }

    async fn delete(&self, id: &SkillListingId) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let before = tables.skills.len();
        tables.skills.retain(|s| s.id() != id);
        if tables.skills.len() == before {
            return Err(listing_not_found(id));
        }
        tables.cascade_listing(&ListingRef::Skill(*id));
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &SkillListingId,
    ) -> Result<Option<SkillListing>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.skills.iter().find(|s| s.id() == id).cloned())
    }

    async fn search(
        &self,
        filter: &SkillFilter,
        page: PageRequest,
    ) -> Result<Page<SkillListing>, DomainError> {
        let tables = self.tables.read().await;
        let matches = tables
            .skills
            .iter()
            .rev()
            .filter(|s| title_matches(s.title(), filter.search.as_deref()))
            .collect();
        Ok(paginate(matches, page))
    }

    async fn list_by_owner(&self, owner_id: &UserId) -> Result<Vec<SkillListing>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .skills
            .iter()
            .rev()
            .filter(|s| s.owner_id() == owner_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::InMemoryDatabase;
    use super::*;
    use crate::domain::exchange::{ExchangeProposal, ExchangeRequest};
    use crate::domain::listing::ItemDetails;
    use crate::domain::messaging::Message;
    use crate::domain::notification::Notification;
    use crate::ports::{ExchangeRepository, MessageRepository, NotificationRepository};
    use chrono::{Duration, Utc};

    fn item(owner: UserId, title: &str, category: &str) -> ItemListing {
        ItemListing::new(
            owner,
            ItemDetails {
                title: title.to_string(),
                description: None,
                category: category.to_string(),
                images: None,
                exchange_preference: None,
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn search_filters_by_category_and_title() {
        let repo = InMemoryDatabase::new().item_repository();
        let owner = UserId::new();
        repo.save(&item(owner, "Cordless Drill", "tools")).await.unwrap();
        repo.save(&item(owner, "Drill bits", "tools")).await.unwrap();
        repo.save(&item(owner, "Drill book", "books")).await.unwrap();

        let filter = ItemFilter {
            category: Some("tools".into()),
            search: Some("drill".into()),
        };
        let page = repo.search(&filter, PageRequest::default()).await.unwrap();

        assert_eq!(page.total, 2);
        assert_eq!(page.items[0].title(), "Drill bits");
        assert!(!page.has_more);
    }

    #[tokio::test]
    async fn search_pages_newest_first() {
        let repo = InMemoryDatabase::new().item_repository();
        let owner = UserId::new();
        for n in 0..5 {
            repo.save(&item(owner, &format!("Item {}", n), "misc")).await.unwrap();
        }

        let page = repo
            .search(&ItemFilter::default(), PageRequest::new(1, 2))
            .await
            .unwrap();

        assert_eq!(page.total, 5);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].title(), "Item 2");
        assert!(page.has_more);
    }

    #[tokio::test]
    async fn delete_cascades_exchanges_and_unlinks_notifications() {
        let db = InMemoryDatabase::new();
        let items = db.item_repository();
        let exchanges = db.exchange_repository();
        let messages = db.message_repository();
        let notifications = db.notification_repository();

        let donor = UserId::new();
        let beneficiary = UserId::new();
        let listing = item(donor, "Ladder", "tools");
        items.save(&listing).await.unwrap();

        let today = Utc::now().date_naive();
        let exchange = ExchangeRequest::create(
            ListingRef::Item(*listing.id()),
            beneficiary,
            donor,
            ExchangeProposal {
                offer: "Jam".into(),
                exchange_date: today + Duration::days(1),
                initial_message: None,
            },
            today,
        )
        .unwrap();
        let notice = Notification::exchange_requested(&exchange, "Bea");
        exchanges.create(&exchange, &notice).await.unwrap();
        let message = Message::compose(&exchange, beneficiary, "Hi".into()).unwrap();
        messages
            .send(&message, &Notification::message_received(donor, *exchange.id(), "Bea"))
            .await
            .unwrap();

        items.delete(listing.id()).await.unwrap();

        assert!(exchanges.find_by_id(exchange.id()).await.unwrap().is_none());
        assert!(messages.find_by_id(message.id()).await.unwrap().is_none());
        let remaining = notifications.list_by_user(&donor).await.unwrap();
        assert_eq!(remaining.len(), 2);
        assert!(remaining.iter().all(|n| n.exchange_id().is_none()));
        assert!(remaining.iter().all(|n| n.listing().is_none()));
    }

    #[tokio::test]
    async fn delete_unknown_listing_is_not_found() {
        let repo = InMemoryDatabase::new().skill_repository();
        let err = repo.delete(&SkillListingId::new()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ListingNotFound);
    }
}
