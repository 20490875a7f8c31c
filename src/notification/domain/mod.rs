//! Domain model for notifications.

mod email;
mod error;
mod in_app;
mod outbox;
mod payload;

pub use email::{EmailAddress, EmailMessage};
pub use error::{NotificationDomainError, ParseNotificationValueError};
pub use in_app::{InAppNotification, InAppNotificationId};
pub use outbox::{DeliveryStatus, OutboxMessage, OutboxMessageId, PersistedOutboxData, RetryPolicy};
pub use payload::{NotificationPayload, ReviewNotification, SlaAlert, SlaAlertKind};
