//! HTTP DTOs for exchange requests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::application::handlers::exchange::CreateExchangeCommand;
use crate::domain::exchange::ExchangeRequest;
use crate::domain::foundation::{
    ExchangeId, ExchangeStatus, ItemListingId, SkillListingId, Timestamp, UserId,
};

/// Exactly one of the listing ids must be given.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateExchangeRequest {
    pub item_listing_id: Option<ItemListingId>,
    pub skill_listing_id: Option<SkillListingId>,
    pub offer: String,
    pub exchange_date: NaiveDate,
    pub initial_message: Option<String>,
}

impl From<CreateExchangeRequest> for CreateExchangeCommand {
    fn from(req: CreateExchangeRequest) -> Self {
        CreateExchangeCommand {
            item_listing_id: req.item_listing_id,
            skill_listing_id: req.skill_listing_id,
            offer: req.offer,
            exchange_date: req.exchange_date,
            initial_message: req.initial_message,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExchangeResponse {
    pub id: ExchangeId,
    pub item_listing_id: Option<ItemListingId>,
    pub skill_listing_id: Option<SkillListingId>,
    pub beneficiary_id: UserId,
    pub donor_id: UserId,
    pub offer: String,
    pub exchange_date: NaiveDate,
    pub initial_message: Option<String>,
    pub status: ExchangeStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&ExchangeRequest> for ExchangeResponse {
    fn from(exchange: &ExchangeRequest) -> Self {
        Self {
            id: *exchange.id(),
            item_listing_id: exchange.listing().item_id(),
            skill_listing_id: exchange.listing().skill_id(),
            beneficiary_id: *exchange.beneficiary_id(),
            donor_id: *exchange.donor_id(),
            offer: exchange.offer().to_string(),
            exchange_date: exchange.exchange_date(),
            initial_message: exchange.initial_message().map(str::to_string),
            status: exchange.status(),
            created_at: *exchange.created_at(),
            updated_at: *exchange.updated_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_parses_iso_date() {
        let req: CreateExchangeRequest = serde_json::from_str(
            r#"{"skill_listing_id":"6f1c1d3e-8a55-4f7e-9a57-0d7b0e3c2a11",
                "offer":"Fresh bread","exchange_date":"2030-05-01"}"#,
        )
        .unwrap();

        assert!(req.item_listing_id.is_none());
        assert!(req.skill_listing_id.is_some());
        assert_eq!(req.exchange_date, NaiveDate::from_ymd_opt(2030, 5, 1).unwrap());
    }
}
