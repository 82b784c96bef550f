//! Notification Model

use serde::{Deserialize, Serialize};

/// Notification source kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum NotificationKind {
    Order,
    Review,
}

/// Notification entity (admin inbox record)
///
/// Created as a side effect of order/review creation; never auto-deleted.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    pub id: i64,
    pub kind: NotificationKind,
    pub message: String,
    pub is_read: bool,
    /// Id of the originating order/review
    pub related_id: i64,
    pub created_at: i64,
}
