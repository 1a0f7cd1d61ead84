//! Exchange module - the request / accept / refuse / complete workflow.

mod aggregate;

pub use aggregate::{
    ExchangeProposal, ExchangeRequest, Participant, MAX_INITIAL_MESSAGE_LENGTH, MAX_OFFER_LENGTH,
};
