//! ExchangeStatus enum for the lifecycle of exchange requests.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{StateMachine, ValidationError};

/// Lifecycle status of an exchange request.
///
/// ```text
/// PENDING ──► ACCEPTED ──► COMPLETED
///    │
///    ├──► REFUSED
///    └──► CANCELLED
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExchangeStatus {
    #[default]
    Pending,
    Accepted,
    Refused,
    Completed,
    Cancelled,
}

impl ExchangeStatus {
    pub const ALL: [ExchangeStatus; 5] = [
        ExchangeStatus::Pending,
        ExchangeStatus::Accepted,
        ExchangeStatus::Refused,
        ExchangeStatus::Completed,
        ExchangeStatus::Cancelled,
    ];

    /// Storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExchangeStatus::Pending => "PENDING",
            ExchangeStatus::Accepted => "ACCEPTED",
            ExchangeStatus::Refused => "REFUSED",
            ExchangeStatus::Completed => "COMPLETED",
            ExchangeStatus::Cancelled => "CANCELLED",
        }
    }
}

impl StateMachine for ExchangeStatus {
    fn valid_transitions(&self) -> Vec<Self> {
        use ExchangeStatus::*;
        match self {
            Pending => vec![Accepted, Refused, Cancelled],
            Accepted => vec![Completed],
            Refused | Completed | Cancelled => vec![],
        }
    }
}

impl fmt::Display for ExchangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExchangeStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(ExchangeStatus::Pending),
            "ACCEPTED" => Ok(ExchangeStatus::Accepted),
            "REFUSED" => Ok(ExchangeStatus::Refused),
            "COMPLETED" => Ok(ExchangeStatus::Completed),
            "CANCELLED" => Ok(ExchangeStatus::Cancelled),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown exchange status '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EDGES: [(ExchangeStatus, ExchangeStatus); 4] = [
        (ExchangeStatus::Pending, ExchangeStatus::Accepted),
        (ExchangeStatus::Pending, ExchangeStatus::Refused),
        (ExchangeStatus::Pending, ExchangeStatus::Cancelled),
        (ExchangeStatus::Accepted, ExchangeStatus::Completed),
    ];

    fn any_status() -> impl Strategy<Value = ExchangeStatus> {
        prop::sample::select(ExchangeStatus::ALL.to_vec())
    }

    #[test]
    fn default_is_pending() {
        assert_eq!(ExchangeStatus::default(), ExchangeStatus::Pending);
    }

    #[test]
    fn terminal_states_have_no_exits() {
        assert!(ExchangeStatus::Refused.is_terminal());
        assert!(ExchangeStatus::Completed.is_terminal());
        assert!(ExchangeStatus::Cancelled.is_terminal());
        assert!(!ExchangeStatus::Pending.is_terminal());
        assert!(!ExchangeStatus::Accepted.is_terminal());
    }

    #[test]
    fn accepted_only_leads_to_completed() {
        assert_eq!(
            ExchangeStatus::Accepted.valid_transitions(),
            vec![ExchangeStatus::Completed]
        );
    }

    #[test]
    fn serializes_to_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&ExchangeStatus::Cancelled).unwrap(),
            "\"CANCELLED\""
        );
        let status: ExchangeStatus = serde_json::from_str("\"ACCEPTED\"").unwrap();
        assert_eq!(status, ExchangeStatus::Accepted);
    }

    #[test]
    fn from_str_matches_as_str() {
        for status in ExchangeStatus::ALL {
            assert_eq!(status.as_str().parse::<ExchangeStatus>().unwrap(), status);
        }
        assert!("pending".parse::<ExchangeStatus>().is_err());
    }

    proptest! {
        #[test]
        fn only_declared_edges_succeed(from in any_status(), to in any_status()) {
            let allowed = EDGES.contains(&(from, to));
            prop_assert_eq!(from.transition_to(to).is_ok(), allowed);
        }
    }
}
