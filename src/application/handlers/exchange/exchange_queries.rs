//! Exchange request queries, scoped to the participants.

use std::sync::Arc;

use crate::domain::exchange::ExchangeRequest;
use crate::domain::foundation::{CommandMetadata, DomainError, ErrorCode, ExchangeId};
use crate::ports::ExchangeRepository;

pub struct ExchangeQueryHandler {
    exchanges: Arc<dyn ExchangeRepository>,
}

impl ExchangeQueryHandler {
    pub fn new(exchanges: Arc<dyn ExchangeRepository>) -> Self {
        Self { exchanges }
    }

    /// A request the caller takes part in. Others see `ExchangeNotFound`.
    pub async fn get(
        &self,
        id: &ExchangeId,
        metadata: CommandMetadata,
    ) -> Result<ExchangeRequest, DomainError> {
        let exchange = self
            .exchanges
            .find_by_id(id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(ErrorCode::ExchangeNotFound, "Exchange request", id)
            })?;
        exchange.ensure_visible_to(&metadata.user_id)?;
        Ok(exchange)
    }

    pub async fn received(
        &self,
        metadata: CommandMetadata,
    ) -> Result<Vec<ExchangeRequest>, DomainError> {
        self.exchanges.list_received(&metadata.user_id).await
    }

    pub async fn sent(&self, metadata: CommandMetadata) -> Result<Vec<ExchangeRequest>, DomainError> {
        self.exchanges.list_sent(&metadata.user_id).await
    }
}
