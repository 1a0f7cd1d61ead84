//! Local Exchange - neighbourhood marketplace for items and skills
//!
//! Users list things they can lend or give away and skills they can offer,
//! request exchanges on each other's listings, talk about them, and review
//! each other once an exchange is completed.
//!
//! The crate follows a hexagonal layout:
//!
//! - `domain` - aggregates, value objects and state machines
//! - `ports` - traits the application needs from the outside world
//! - `application` - command and query handlers
//! - `adapters` - PostgreSQL, in-memory, HTTP, auth and file storage
//! - `config` - environment-driven configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
