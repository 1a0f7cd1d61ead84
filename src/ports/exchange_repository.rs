//! Exchange request repository port.
//!
//! # Atomicity
//!
//! Every write carries the notification it produces, and implementations
//! persist both or neither. Status changes are compare-and-set: the row is
//! only updated if its stored status still equals the status the caller
//! loaded. A lost race surfaces as `InvalidStateTransition`.

use crate::domain::exchange::ExchangeRequest;
use crate::domain::foundation::{DomainError, ExchangeId, ExchangeStatus, UserId};
use crate::domain::notification::Notification;
use async_trait::async_trait;

#[async_trait]
pub trait ExchangeRepository: Send + Sync {
    /// Insert a new request together with the donor's notification.
    async fn create(
        &self,
        exchange: &ExchangeRequest,
        notification: &Notification,
    ) -> Result<(), DomainError>;

    /// Persist a status change made on `exchange`.
    ///
    /// # Errors
    ///
    /// - `ExchangeNotFound` if the request vanished
    /// - `InvalidStateTransition` if the stored status is no longer `previous`
    async fn transition(
        &self,
        exchange: &ExchangeRequest,
        previous: ExchangeStatus,
        notification: Option<&Notification>,
    ) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &ExchangeId) -> Result<Option<ExchangeRequest>, DomainError>;

    /// Requests where the user is the donor, newest first.
    async fn list_received(&self, donor_id: &UserId) -> Result<Vec<ExchangeRequest>, DomainError>;

    /// Requests where the user is the beneficiary, newest first.
    async fn list_sent(&self, beneficiary_id: &UserId)
        -> Result<Vec<ExchangeRequest>, DomainError>;

    /// Number of COMPLETED requests the user took part in, on either side.
    async fn count_completed_for_user(&self, user_id: &UserId) -> Result<u64, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exchange_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ExchangeRepository) {}
    }
}
