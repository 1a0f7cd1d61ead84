//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! Every write that carries a notification runs in one transaction, so the
//! main row and its notification commit or roll back together.

mod exchange_repository;
mod listing_repository;
mod message_repository;
mod notification_repository;
mod review_repository;
mod support;
mod user_repository;

pub use exchange_repository::PostgresExchangeRepository;
pub use listing_repository::{PostgresItemListingRepository, PostgresSkillListingRepository};
pub use message_repository::PostgresMessageRepository;
pub use notification_repository::PostgresNotificationRepository;
pub use review_repository::PostgresReviewRepository;
pub use user_repository::PostgresUserRepository;
