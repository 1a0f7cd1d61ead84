//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `user` - Accounts and public profiles
//! - `listing` - Items and skills offered for exchange
//! - `exchange` - Exchange request lifecycle
//! - `messaging` - Messages between exchange participants
//! - `notification` - In-app notices
//! - `review` - Ratings after a completed exchange

pub mod exchange;
pub mod foundation;
pub mod listing;
pub mod messaging;
pub mod notification;
pub mod review;
pub mod user;
