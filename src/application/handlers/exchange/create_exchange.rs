//! CreateExchangeHandler - opens an exchange request on a listing.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use crate::domain::exchange::{ExchangeProposal, ExchangeRequest};
use crate::domain::foundation::{
    CommandMetadata, DomainError, ErrorCode, ItemListingId, OwnedByUser, SkillListingId, UserId,
};
use crate::domain::listing::ListingRef;
use crate::domain::notification::Notification;
use crate::ports::{
    ExchangeRepository, ItemListingRepository, SkillListingRepository, UserRepository,
};

/// Command to request an exchange. Exactly one of the listing ids is expected.
#[derive(Debug, Clone)]
pub struct CreateExchangeCommand {
    pub item_listing_id: Option<ItemListingId>,
    pub skill_listing_id: Option<SkillListingId>,
    pub offer: String,
    pub exchange_date: NaiveDate,
    pub initial_message: Option<String>,
}

pub struct CreateExchangeHandler {
    users: Arc<dyn UserRepository>,
    items: Arc<dyn ItemListingRepository>,
    skills: Arc<dyn SkillListingRepository>,
    exchanges: Arc<dyn ExchangeRepository>,
}

fn unknown_listing(listing: &ListingRef) -> DomainError {
    match listing {
        ListingRef::Item(id) => {
            DomainError::not_found(ErrorCode::ListingNotFound, "Item listing", id)
        }
        ListingRef::Skill(id) => {
            DomainError::not_found(ErrorCode::ListingNotFound, "Skill listing", id)
        }
    }
}

impl CreateExchangeHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        items: Arc<dyn ItemListingRepository>,
        skills: Arc<dyn SkillListingRepository>,
        exchanges: Arc<dyn ExchangeRepository>,
    ) -> Self {
        Self {
            users,
            items,
            skills,
            exchanges,
        }
    }

    /// Owner of the referenced listing, which becomes the donor.
    async fn resolve_donor(&self, listing: &ListingRef) -> Result<UserId, DomainError> {
        match listing {
            ListingRef::Item(id) => self
                .items
                .find_by_id(id)
                .await?
                .map(|item| *item.owner_id())
                .ok_or_else(|| unknown_listing(listing)),
            ListingRef::Skill(id) => self
                .skills
                .find_by_id(id)
                .await?
                .map(|skill| *skill.owner_id())
                .ok_or_else(|| unknown_listing(listing)),
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateExchangeCommand,
        metadata: CommandMetadata,
    ) -> Result<ExchangeRequest, DomainError> {
        // 1. Resolve the listing and its owner
        let listing = ListingRef::from_parts(cmd.item_listing_id, cmd.skill_listing_id)?;
        let donor_id = self.resolve_donor(&listing).await?;

        // 2. Load the requester for the notification text
        let beneficiary = self
            .users
            .find_by_id(&metadata.user_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(ErrorCode::UserNotFound, "User", metadata.user_id)
            })?;

        // 3. Build the request
        let exchange = ExchangeRequest::create(
            listing,
            *beneficiary.id(),
            donor_id,
            ExchangeProposal {
                offer: cmd.offer,
                exchange_date: cmd.exchange_date,
                initial_message: cmd.initial_message,
            },
            Utc::now().date_naive(),
        )?;

        // 4. Persist with the donor's notification
        let notification = Notification::exchange_requested(&exchange, beneficiary.name());
        self.exchanges.create(&exchange, &notification).await?;

        tracing::info!(
            exchange_id = %exchange.id(),
            listing = %exchange.listing(),
            beneficiary_id = %exchange.beneficiary_id(),
            donor_id = %exchange.donor_id(),
            correlation_id = %metadata.correlation_id(),
            "Exchange requested"
        );
        Ok(exchange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::foundation::{ErrorKind, ExchangeStatus};
    use crate::domain::notification::NotificationKind;
    use chrono::Duration;

    fn cmd(item: Option<ItemListingId>, skill: Option<SkillListingId>) -> CreateExchangeCommand {
        CreateExchangeCommand {
            item_listing_id: item,
            skill_listing_id: skill,
            offer: "Fresh eggs".into(),
            exchange_date: Utc::now().date_naive() + Duration::days(3),
            initial_message: Some("Is it still available?".into()),
        }
    }

    fn handler(fx: &Fixture) -> CreateExchangeHandler {
        CreateExchangeHandler::new(fx.users(), fx.items(), fx.skills(), fx.exchanges())
    }

    #[tokio::test]
    async fn creates_pending_request_and_notifies_donor() {
        let fx = Fixture::new();
        let dora = fx.user("Dora").await;
        let ben = fx.user("Ben").await;
        let item = fx.item_for(&dora).await;

        let exchange = handler(&fx)
            .handle(cmd(Some(*item.id()), None), CommandMetadata::new(*ben.id()))
            .await
            .unwrap();

        assert_eq!(exchange.status(), ExchangeStatus::Pending);
        assert_eq!(exchange.donor_id(), dora.id());
        let notices = fx.notifications().list_by_user(dora.id()).await.unwrap();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind(), NotificationKind::NewRequest);
        assert_eq!(notices[0].message(), "Ben wants to exchange with you");
        assert_eq!(notices[0].exchange_id(), Some(exchange.id()));
        assert_eq!(notices[0].listing().and_then(|l| l.item_id()), Some(*item.id()));
    }

    #[tokio::test]
    async fn works_for_skills_too() {
        let fx = Fixture::new();
        let dora = fx.user("Dora").await;
        let ben = fx.user("Ben").await;
        let skill = fx.skill_for(&dora).await;

        let exchange = handler(&fx)
            .handle(cmd(None, Some(*skill.id())), CommandMetadata::new(*ben.id()))
            .await
            .unwrap();

        assert_eq!(exchange.listing().skill_id(), Some(*skill.id()));
    }

    #[tokio::test]
    async fn rejects_neither_or_both_listings() {
        let fx = Fixture::new();
        let dora = fx.user("Dora").await;
        let ben = fx.user("Ben").await;
        let item = fx.item_for(&dora).await;
        let skill = fx.skill_for(&dora).await;
        let h = handler(&fx);
        let meta = CommandMetadata::new(*ben.id());

        for c in [
            cmd(None, None),
            cmd(Some(*item.id()), Some(*skill.id())),
        ] {
            let err = h.handle(c, meta.clone()).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }
        assert!(fx.exchanges().list_sent(ben.id()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_listing_is_not_found() {
        let fx = Fixture::new();
        let ben = fx.user("Ben").await;
        let h = handler(&fx);
        let meta = CommandMetadata::new(*ben.id());

        for c in [
            cmd(Some(ItemListingId::new()), None),
            cmd(None, Some(SkillListingId::new())),
        ] {
            let err = h.handle(c, meta.clone()).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::ListingNotFound);
            assert_eq!(err.kind(), ErrorKind::NotFound);
        }
        assert!(fx.exchanges().list_sent(ben.id()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn owner_cannot_request_own_listing() {
        let fx = Fixture::new();
        let dora = fx.user("Dora").await;
        let item = fx.item_for(&dora).await;

        let err = handler(&fx)
            .handle(cmd(Some(*item.id()), None), CommandMetadata::new(*dora.id()))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[tokio::test]
    async fn past_date_is_rejected() {
        let fx = Fixture::new();
        let dora = fx.user("Dora").await;
        let ben = fx.user("Ben").await;
        let item = fx.item_for(&dora).await;
        let mut c = cmd(Some(*item.id()), None);
        c.exchange_date = Utc::now().date_naive() - Duration::days(1);

        let err = handler(&fx)
            .handle(c, CommandMetadata::new(*ben.id()))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
