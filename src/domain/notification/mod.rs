//! Notification module - in-app notices addressed to a single user.

mod aggregate;
mod kind;

pub use aggregate::Notification;
pub use kind::NotificationKind;
