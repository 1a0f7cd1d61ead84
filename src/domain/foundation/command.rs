//! Command infrastructure for handlers.
//!
//! Every command handler receives a `CommandMetadata` carrying the acting
//! user (always resolved from the bearer token, never from the payload)
//! and a correlation id used as a tracing field.

use uuid::Uuid;

use super::UserId;

/// Metadata context for command handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandMetadata {
    /// The user executing this command.
    pub user_id: UserId,

    /// Links log lines of a single request. Generated lazily if absent.
    correlation_id: Option<String>,
}

impl CommandMetadata {
    /// Creates new command metadata for the acting user.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            correlation_id: None,
        }
    }

    /// Sets the correlation ID (usually the inbound request id).
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Returns the correlation ID, generating one if not set.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }
}
