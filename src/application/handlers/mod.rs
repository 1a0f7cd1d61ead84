//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations. Each
//! handler holds `Arc<dyn Port>` handles and performs at most one
//! repository write per command, so a command either fully happens or not
//! at all.

pub mod auth;
pub mod exchange;
pub mod listing;
pub mod messaging;
pub mod notification;
pub mod review;

#[cfg(test)]
pub(crate) mod test_support {
    //! Shared fixtures for handler tests, backed by the in-memory adapters.

    use std::sync::Arc;

    use chrono::{Duration, Utc};

    use super::auth::ProfileReader;
    use crate::adapters::memory::InMemoryDatabase;
    use crate::domain::exchange::{ExchangeProposal, ExchangeRequest};
    use crate::domain::foundation::{Rating, UserId};
    use crate::domain::listing::{ItemDetails, ItemListing, ListingRef, SkillDetails, SkillListing};
    use crate::domain::notification::Notification;
    use crate::domain::review::Review;
    use crate::domain::user::{Email, User};
    use crate::ports::{
        ExchangeRepository, ItemListingRepository, MessageRepository, NotificationRepository,
        ReviewRepository, SkillListingRepository, UserRepository,
    };

    pub struct Fixture {
        pub db: InMemoryDatabase,
    }

    impl Fixture {
        pub fn new() -> Self {
            Self {
                db: InMemoryDatabase::new(),
            }
        }

        pub fn users(&self) -> Arc<dyn UserRepository> {
            Arc::new(self.db.user_repository())
        }

        pub fn items(&self) -> Arc<dyn ItemListingRepository> {
            Arc::new(self.db.item_repository())
        }

        pub fn skills(&self) -> Arc<dyn SkillListingRepository> {
            Arc::new(self.db.skill_repository())
        }

        pub fn exchanges(&self) -> Arc<dyn ExchangeRepository> {
            Arc::new(self.db.exchange_repository())
        }

        pub fn messages(&self) -> Arc<dyn MessageRepository> {
            Arc::new(self.db.message_repository())
        }

        pub fn notifications(&self) -> Arc<dyn NotificationRepository> {
            Arc::new(self.db.notification_repository())
        }

        pub fn reviews(&self) -> Arc<dyn ReviewRepository> {
            Arc::new(self.db.review_repository())
        }

        pub fn profile_reader(&self) -> ProfileReader {
            ProfileReader::new(self.users(), self.exchanges(), self.reviews())
        }

        pub async fn user(&self, name: &str) -> User {
            let email = format!("{}-{}@example.com", name.to_lowercase(), UserId::new());
            let user = User::register(
                Email::parse(&email).unwrap(),
                "mock-hash:secret1".to_string(),
                name.to_string(),
                "Lyon".to_string(),
            )
            .unwrap();
            self.users().save(&user).await.unwrap();
            user
        }

        pub async fn item_for(&self, owner: &User) -> ItemListing {
            let item = ItemListing::new(
                *owner.id(),
                ItemDetails {
                    title: "Cordless drill".to_string(),
                    description: Some("18V, two batteries".to_string()),
                    category: "tools".to_string(),
                    images: None,
                    exchange_preference: None,
                },
            )
            .unwrap();
            self.items().save(&item).await.unwrap();
            item
        }

        pub async fn skill_for(&self, owner: &User) -> SkillListing {
            let skill = SkillListing::new(
                *owner.id(),
                SkillDetails {
                    title: "Bike repair".to_string(),
                    description: None,
                    availability: "Saturday mornings".to_string(),
                    images: None,
                    exchange_preference: None,
                },
            )
            .unwrap();
            self.skills().save(&skill).await.unwrap();
            skill
        }

        /// Returns (exchange, beneficiary, donor).
        pub async fn pending_exchange(&self) -> (ExchangeRequest, User, User) {
            let donor = self.user("Dora").await;
            self.pending_exchange_with(donor).await
        }

        /// A fresh beneficiary requesting a new item of `donor`.
        pub async fn pending_exchange_with(&self, donor: User) -> (ExchangeRequest, User, User) {
            let beneficiary = self.user("Ben").await;
            let item = self.item_for(&donor).await;
            let today = Utc::now().date_naive();
            let exchange = ExchangeRequest::create(
                ListingRef::Item(*item.id()),
                *beneficiary.id(),
                *donor.id(),
                ExchangeProposal {
                    offer: "A basket of apples".to_string(),
                    exchange_date: today + Duration::days(7),
                    initial_message: None,
                },
                today,
            )
            .unwrap();
            self.exchanges()
                .create(
                    &exchange,
                    &Notification::exchange_requested(&exchange, beneficiary.name()),
                )
                .await
                .unwrap();
            (exchange, beneficiary, donor)
        }

        pub async fn accepted_exchange(&self) -> (ExchangeRequest, User, User) {
            let (mut exchange, beneficiary, donor) = self.pending_exchange().await;
            let previous = exchange.accept(donor.id()).unwrap();
            self.exchanges()
                .transition(&exchange, previous, None)
                .await
                .unwrap();
            (exchange, beneficiary, donor)
        }

        pub async fn completed_exchange(&self) -> (ExchangeRequest, User, User) {
            let donor = self.user("Dora").await;
            self.completed_exchange_with(donor).await
        }

        pub async fn completed_exchange_with(&self, donor: User) -> (ExchangeRequest, User, User) {
            let (mut exchange, beneficiary, donor) = self.pending_exchange_with(donor).await;
            let previous = exchange.accept(donor.id()).unwrap();
            self.exchanges()
                .transition(&exchange, previous, None)
                .await
                .unwrap();
            let previous = exchange.complete(donor.id()).unwrap();
            self.exchanges()
                .transition(&exchange, previous, None)
                .await
                .unwrap();
            (exchange, beneficiary, donor)
        }

        pub async fn review(&self, exchange: &ExchangeRequest, reviewer: &User, rating: i32) {
            let review = Review::write(
                exchange,
                *reviewer.id(),
                Rating::new(rating).unwrap(),
                None,
            )
            .unwrap();
            let notice =
                Notification::review_received(*review.reviewee_id(), *exchange.id(), reviewer.name());
            self.reviews().save(&review, &notice).await.unwrap();
        }
    }
}
