//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers take a command plus [`CommandMetadata`] for the acting
//! user; query handlers read through the same repository ports.
//!
//! [`CommandMetadata`]: crate::domain::foundation::CommandMetadata

pub mod handlers;
