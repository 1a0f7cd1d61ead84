//! TransitionExchangeHandler - accept, refuse, complete or cancel a request.

use std::fmt;
use std::sync::Arc;

use crate::domain::exchange::ExchangeRequest;
use crate::domain::foundation::{CommandMetadata, DomainError, ErrorCode, ExchangeId};
use crate::domain::notification::Notification;
use crate::ports::{ExchangeRepository, UserRepository};

/// Lifecycle action requested by a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeAction {
    Accept,
    Refuse,
    Complete,
    Cancel,
}

impl fmt::Display for ExchangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExchangeAction::Accept => "accept",
            ExchangeAction::Refuse => "refuse",
            ExchangeAction::Complete => "complete",
            ExchangeAction::Cancel => "cancel",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone)]
pub struct TransitionExchangeCommand {
    pub exchange_id: ExchangeId,
    pub action: ExchangeAction,
}

pub struct TransitionExchangeHandler {
    users: Arc<dyn UserRepository>,
    exchanges: Arc<dyn ExchangeRepository>,
}

impl TransitionExchangeHandler {
    pub fn new(users: Arc<dyn UserRepository>, exchanges: Arc<dyn ExchangeRepository>) -> Self {
        Self { users, exchanges }
    }

    async fn donor_name(&self, exchange: &ExchangeRequest) -> Result<String, DomainError> {
        let donor = self
            .users
            .find_by_id(exchange.donor_id())
            .await?
            .ok_or_else(|| {
                DomainError::not_found(ErrorCode::UserNotFound, "User", exchange.donor_id())
            })?;
        Ok(donor.name().to_string())
    }

    pub async fn handle(
        &self,
        cmd: TransitionExchangeCommand,
        metadata: CommandMetadata,
    ) -> Result<ExchangeRequest, DomainError> {
        // 1. Load
        let mut exchange = self
            .exchanges
            .find_by_id(&cmd.exchange_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(
                    ErrorCode::ExchangeNotFound,
                    "Exchange request",
                    cmd.exchange_id,
                )
            })?;

        // 2. Apply; actor checks come before status checks
        let actor = metadata.user_id;
        let previous = match cmd.action {
            ExchangeAction::Accept => exchange.accept(&actor)?,
            ExchangeAction::Refuse => exchange.refuse(&actor)?,
            ExchangeAction::Complete => exchange.complete(&actor)?,
            ExchangeAction::Cancel => exchange.cancel(&actor)?,
        };

        // 3. Notify the beneficiary of the donor's decision
        let notification = match cmd.action {
            ExchangeAction::Accept => Some(Notification::exchange_accepted(
                &exchange,
                &self.donor_name(&exchange).await?,
            )),
            ExchangeAction::Refuse => Some(Notification::exchange_refused(
                &exchange,
                &self.donor_name(&exchange).await?,
            )),
            ExchangeAction::Complete | ExchangeAction::Cancel => None,
        };

        // 4. Compare-and-set persist
        self.exchanges
            .transition(&exchange, previous, notification.as_ref())
            .await?;

        tracing::info!(
            exchange_id = %exchange.id(),
            action = %cmd.action,
            from = %previous,
            to = %exchange.status(),
            actor = %actor,
            correlation_id = %metadata.correlation_id(),
            "Exchange transitioned"
        );
        Ok(exchange)
    }
}
