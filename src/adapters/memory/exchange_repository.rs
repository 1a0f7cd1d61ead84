use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::Tables;
use crate::domain::exchange::ExchangeRequest;
use crate::domain::foundation::{
    DomainError, ErrorCode, ExchangeId, ExchangeStatus, UserId,
};
use crate::domain::notification::Notification;
use crate::ports::ExchangeRepository;

pub struct InMemoryExchangeRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryExchangeRepository {
    pub(crate) fn new(tables: Arc<RwLock<Tables>>) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl ExchangeRepository for InMemoryExchangeRepository {
    async fn create(
        &self,
        exchange: &ExchangeRequest,
        notification: &Notification,
    ) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        tables.exchanges.push(exchange.clone());
        tables.notifications.push(notification.clone());
        Ok(())
    }

    async fn transition(
        &self,
        exchange: &ExchangeRequest,
        previous: ExchangeStatus,
        notification: Option<&Notification>,
    ) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let slot = tables
            .exchanges
            .iter_mut()
            .find(|e| e.id() == exchange.id())
            .ok_or_else(|| {
                DomainError::not_found(ErrorCode::ExchangeNotFound, "Exchange request", exchange.id())
            })?;
        if slot.status() != previous {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Exchange request was modified concurrently",
            )
            .with_detail("status", slot.status().to_string()));
        }
        *slot = exchange.clone();
        if let Some(notification) = notification {
            tables.notifications.push(notification.clone());
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &ExchangeId) -> Result<Option<ExchangeRequest>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.exchanges.iter().find(|e| e.id() == id).cloned())
    }

    async fn list_received(&self, donor_id: &UserId) -> Result<Vec<ExchangeRequest>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .exchanges
            .iter()
            .rev()
            .filter(|e| e.donor_id() == donor_id)
            .cloned()
            .collect())
    }

    async fn list_sent(
        &self,
        beneficiary_id: &UserId,
    ) -> Result<Vec<ExchangeRequest>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .exchanges
            .iter()
            .rev()
            .filter(|e| e.beneficiary_id() == beneficiary_id)
            .cloned()
            .collect())
    }

    async fn count_completed_for_user(&self, user_id: &UserId) -> Result<u64, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .exchanges
            .iter()
            .filter(|e| e.status() == ExchangeStatus::Completed && e.is_participant(user_id))
            .count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::super::InMemoryDatabase;
    use super::*;
    use crate::domain::exchange::ExchangeProposal;
    use crate::domain::foundation::SkillListingId;
    use crate::domain::listing::ListingRef;
    use crate::ports::NotificationRepository;
    use chrono::{Duration, Utc};

    fn exchange(beneficiary: UserId, donor: UserId) -> ExchangeRequest {
        let today = Utc::now().date_naive();
        ExchangeRequest::create(
            ListingRef::Skill(SkillListingId::new()),
            beneficiary,
            donor,
            ExchangeProposal {
                offer: "Plums".into(),
                exchange_date: today + Duration::days(1),
                initial_message: None,
            },
            today,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn create_stores_request_and_notification() {
        let db = InMemoryDatabase::new();
        let repo = db.exchange_repository();
        let (beneficiary, donor) = (UserId::new(), UserId::new());
        let request = exchange(beneficiary, donor);

        repo.create(&request, &Notification::exchange_requested(&request, "Bea"))
            .await
            .unwrap();

        assert_eq!(repo.list_received(&donor).await.unwrap().len(), 1);
        assert_eq!(repo.list_sent(&beneficiary).await.unwrap().len(), 1);
        assert_eq!(
            db.notification_repository().count_unread(&donor).await.unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn stale_transition_is_rejected() {
        let repo = InMemoryDatabase::new().exchange_repository();
        let (beneficiary, donor) = (UserId::new(), UserId::new());
        let request = exchange(beneficiary, donor);
        repo.create(&request, &Notification::exchange_requested(&request, "Bea"))
            .await
            .unwrap();

        let mut accepted = request.clone();
        let prev = accepted.accept(&donor).unwrap();
        let mut refused = request.clone();
        let prev_refused = refused.refuse(&donor).unwrap();

        repo.transition(&accepted, prev, None).await.unwrap();
        let err = repo.transition(&refused, prev_refused, None).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        let stored = repo.find_by_id(request.id()).await.unwrap().unwrap();
        assert_eq!(stored.status(), ExchangeStatus::Accepted);
    }

    #[tokio::test]
    async fn counts_completed_on_both_sides() {
        let repo = InMemoryDatabase::new().exchange_repository();
        let (beneficiary, donor) = (UserId::new(), UserId::new());
        let mut request = exchange(beneficiary, donor);
        repo.create(&request, &Notification::exchange_requested(&request, "Bea"))
            .await
            .unwrap();

        let prev = request.accept(&donor).unwrap();
        repo.transition(&request, prev, None).await.unwrap();
        let prev = request.complete(&donor).unwrap();
        repo.transition(&request, prev, None).await.unwrap();

        assert_eq!(repo.count_completed_for_user(&donor).await.unwrap(), 1);
        assert_eq!(repo.count_completed_for_user(&beneficiary).await.unwrap(), 1);
        assert_eq!(repo.count_completed_for_user(&UserId::new()).await.unwrap(), 0);
    }
}
