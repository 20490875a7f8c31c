//! Port contracts for notification storage and delivery.

pub mod directory;
pub mod in_app;
pub mod mailer;
pub mod outbox;

pub use directory::{DirectoryError, DirectoryResult, UserDirectory};
pub use in_app::InAppNotifications;
pub use mailer::{DeliveryError, Mailer};
pub use outbox::{NotificationOutbox, NotificationStoreError, NotificationStoreResult};

#[cfg(test)]
pub use mailer::MockMailer;
