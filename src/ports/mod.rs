//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `UserRepository` - Accounts
//! - `ItemListingRepository` / `SkillListingRepository` - Listings, cascade on delete
//! - `ExchangeRepository` - Exchange requests with compare-and-set transitions
//! - `MessageRepository` - Conversation messages
//! - `NotificationRepository` - In-app notices
//! - `ReviewRepository` - Ratings and averages
//!
//! Writes that produce a notification take it as an argument so the two are
//! committed together.
//!
//! ## Infrastructure Ports
//!
//! - `SessionValidator` - Bearer token validation
//! - `PasswordHasher` / `TokenIssuer` - Credentials
//! - `FileStorage` - Uploaded images

mod credentials;
mod exchange_repository;
mod file_storage;
mod listing_repository;
mod message_repository;
mod notification_repository;
mod review_repository;
mod session_validator;
mod user_repository;

pub use credentials::{IssuedToken, PasswordHasher, TokenIssuer};
pub use exchange_repository::ExchangeRepository;
pub use file_storage::{FileStorage, StorageError};
pub use listing_repository::{ItemFilter, ItemListingRepository, SkillFilter, SkillListingRepository};
pub use message_repository::MessageRepository;
pub use notification_repository::NotificationRepository;
pub use review_repository::ReviewRepository;
pub use session_validator::SessionValidator;
pub use user_repository::UserRepository;
