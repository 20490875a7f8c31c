//! In-app notification rows.

use crate::audit::domain::EntityRef;
use crate::authority::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an in-app notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InAppNotificationId(Uuid);

impl InAppNotificationId {
    /// Creates a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for InAppNotificationId {
    fn default() -> Self {
        Self::new()
    }
}

/// A notification row shown in a user's inbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InAppNotification {
    /// Row identifier.
    pub id: InAppNotificationId,
    /// Recipient.
    pub user_id: UserId,
    /// Short heading.
    pub title: String,
    /// Message text.
    pub message: String,
    /// Entity the notification links to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related: Option<EntityRef>,
    /// Whether the recipient has read it.
    pub read: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl InAppNotification {
    /// Creates an unread notification for `user_id`.
    #[must_use]
    pub fn new(
        user_id: UserId,
        title: impl Into<String>,
        message: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: InAppNotificationId::new(),
            user_id,
            title: title.into(),
            message: message.into(),
            related: None,
            read: false,
            created_at: clock.utc(),
        }
    }

    /// Links the notification to an entity.
    #[must_use]
    pub fn with_related(mut self, related: EntityRef) -> Self {
        self.related = Some(related);
        self
    }
}
