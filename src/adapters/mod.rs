//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - JWT tokens, Argon2 password hashing, test doubles
//! - `http` - REST API over axum
//! - `memory` - In-memory repositories for tests and local runs
//! - `postgres` - PostgreSQL repositories
//! - `storage` - Uploaded files on the local filesystem

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod storage;
