//! In-memory persistence adapters.
//!
//! All repositories created from one [`InMemoryDatabase`] share a single
//! table set behind one async `RwLock`. Each repository write takes the
//! write lock once, which gives the same all-or-nothing behaviour the
//! PostgreSQL adapters get from a transaction.
//!
//! Rows are kept in insertion order, so "newest first" is reverse order.
//!
//! # Example
//!
//! ```ignore
//! let db = InMemoryDatabase::new();
//! let users = Arc::new(db.user_repository());
//! let exchanges = Arc::new(db.exchange_repository());
//! ```

mod exchange_repository;
mod listing_repository;
mod message_repository;
mod notification_repository;
mod review_repository;
mod user_repository;

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::exchange::ExchangeRequest;
use crate::domain::foundation::ExchangeId;
use crate::domain::listing::{ItemListing, ListingRef, SkillListing};
use crate::domain::messaging::Message;
use crate::domain::notification::Notification;
use crate::domain::review::Review;
use crate::domain::user::User;

pub use exchange_repository::InMemoryExchangeRepository;
pub use listing_repository::{InMemoryItemListingRepository, InMemorySkillListingRepository};
pub use message_repository::InMemoryMessageRepository;
pub use notification_repository::InMemoryNotificationRepository;
pub use review_repository::InMemoryReviewRepository;
pub use user_repository::InMemoryUserRepository;

/// Table set shared by all in-memory repositories.
#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub users: Vec<User>,
    pub items: Vec<ItemListing>,
    pub skills: Vec<SkillListing>,
    pub exchanges: Vec<ExchangeRequest>,
    pub messages: Vec<Message>,
    pub notifications: Vec<Notification>,
    pub reviews: Vec<Review>,
}

impl Tables {
    /// Removes every exchange about `listing` together with its messages and
    /// reviews, and unlinks notifications that pointed at any of them.
    pub(crate) fn cascade_listing(&mut self, listing: &ListingRef) {
        let doomed: Vec<ExchangeId> = self
            .exchanges
            .iter()
            .filter(|e| e.listing() == listing)
            .map(|e| *e.id())
            .collect();

        self.exchanges.retain(|e| e.listing() != listing);
        self.messages.retain(|m| !doomed.contains(m.exchange_id()));
        self.reviews.retain(|r| !doomed.contains(r.exchange_id()));

        for notification in self.notifications.iter_mut() {
            let links_exchange = notification
                .exchange_id()
                .map_or(false, |id| doomed.contains(id));
            let links_listing = notification.listing() == Some(listing);
            if links_exchange || links_listing {
                notification.clear_links();
            }
        }
    }
}

/// Handle to a shared in-memory table set.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDatabase {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repository(&self) -> InMemoryUserRepository {
        InMemoryUserRepository::new(self.tables.clone())
    }

    pub fn item_repository(&self) -> InMemoryItemListingRepository {
        InMemoryItemListingRepository::new(self.tables.clone())
    }

    pub fn skill_repository(&self) -> InMemorySkillListingRepository {
        InMemorySkillListingRepository::new(self.tables.clone())
    }

    pub fn exchange_repository(&self) -> InMemoryExchangeRepository {
        InMemoryExchangeRepository::new(self.tables.clone())
    }

    pub fn message_repository(&self) -> InMemoryMessageRepository {
        InMemoryMessageRepository::new(self.tables.clone())
    }

    pub fn notification_repository(&self) -> InMemoryNotificationRepository {
        InMemoryNotificationRepository::new(self.tables.clone())
    }

    pub fn review_repository(&self) -> InMemoryReviewRepository {
        InMemoryReviewRepository::new(self.tables.clone())
    }
}
