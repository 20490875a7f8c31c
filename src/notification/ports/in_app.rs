//! In-app notification store port.

use super::NotificationStoreResult;
use crate::authority::domain::UserId;
use crate::notification::domain::InAppNotification;
use async_trait::async_trait;

/// Store of notification rows shown inside the application.
#[async_trait]
pub trait InAppNotifications: Send + Sync {
    /// Inserts a notification row.
    ///
    /// # Errors
    ///
    /// Returns [`super::NotificationStoreError::Duplicate`] when the row
    /// identifier already exists.
    async fn insert(&self, notification: &InAppNotification) -> NotificationStoreResult<()>;

    /// Returns the rows addressed to `user_id`, newest first.
    async fn list_for_user(&self, user_id: UserId)
    -> NotificationStoreResult<Vec<InAppNotification>>;
}
