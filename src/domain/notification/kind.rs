use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// What happened that a user is being told about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    NewRequest,
    RequestAccepted,
    RequestRefused,
    NewMessage,
    ReviewReceived,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::NewRequest => "NEW_REQUEST",
            NotificationKind::RequestAccepted => "REQUEST_ACCEPTED",
            NotificationKind::RequestRefused => "REQUEST_REFUSED",
            NotificationKind::NewMessage => "NEW_MESSAGE",
            NotificationKind::ReviewReceived => "REVIEW_RECEIVED",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEW_REQUEST" => Ok(NotificationKind::NewRequest),
            "REQUEST_ACCEPTED" => Ok(NotificationKind::RequestAccepted),
            "REQUEST_REFUSED" => Ok(NotificationKind::RequestRefused),
            "NEW_MESSAGE" => Ok(NotificationKind::NewMessage),
            "REVIEW_RECEIVED" => Ok(NotificationKind::ReviewReceived),
            other => Err(ValidationError::invalid_format(
                "kind",
                format!("unknown notification kind '{}'", other),
            )),
        }
    }
}
