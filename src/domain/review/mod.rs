//! Review module - ratings left after a completed exchange.

mod aggregate;

pub use aggregate::{already_reviewed, Review, MAX_COMMENT_LENGTH};
