//! Exchange request command and query handlers.

mod create_exchange;
mod exchange_queries;
mod transition_exchange;

pub use create_exchange::{CreateExchangeCommand, CreateExchangeHandler};
pub use exchange_queries::ExchangeQueryHandler;
pub use transition_exchange::{
    ExchangeAction, TransitionExchangeCommand, TransitionExchangeHandler,
};
