//! HTTP DTOs for the notification inbox.

use serde::Serialize;

use crate::domain::foundation::{ExchangeId, ItemListingId, NotificationId, SkillListingId, Timestamp};
use crate::domain::notification::{Notification, NotificationKind};

#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    pub id: NotificationId,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    pub is_read: bool,
    pub exchange_id: Option<ExchangeId>,
    pub item_listing_id: Option<ItemListingId>,
    pub skill_listing_id: Option<SkillListingId>,
    pub created_at: Timestamp,
}

impl From<&Notification> for NotificationResponse {
    fn from(n: &Notification) -> Self {
        Self {
            id: *n.id(),
            kind: n.kind(),
            message: n.message().to_string(),
            is_read: n.is_read(),
            exchange_id: n.exchange_id().copied(),
            item_listing_id: n.listing().and_then(|l| l.item_id()),
            skill_listing_id: n.listing().and_then(|l| l.skill_id()),
            created_at: *n.created_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UnreadCountResponse {
    pub count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageBody {
    pub message: String,
}
