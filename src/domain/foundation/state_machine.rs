//! State machine trait for status enums.
//!
//! Gives lifecycle enums a single place to declare their edges and a
//! validated `transition_to` that every mutation goes through.

use super::{DomainError, ErrorCode};

/// Trait for status enums that represent state machines.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for ExchangeStatus {
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             Pending => vec![Accepted, Refused, Cancelled],
///             Accepted => vec![Completed],
///             _ => vec![],
///         }
///     }
/// }
///
/// let next = current.transition_to(ExchangeStatus::Accepted)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Performs transition with validation.
    ///
    /// Fails with `InvalidStateTransition` when the edge does not exist.
    fn transition_to(&self, target: Self) -> Result<Self, DomainError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
