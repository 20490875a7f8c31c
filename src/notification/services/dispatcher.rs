//! Outbox dispatcher delivering due notifications with retry.

use super::renderer::{EmailRenderer, RenderError};
use crate::notification::{
    domain::{
        DeliveryStatus, EmailAddress, EmailMessage, NotificationDomainError, NotificationPayload,
        OutboxMessage, RetryPolicy,
    },
    ports::{
        DeliveryError, DirectoryError, Mailer, NotificationOutbox, NotificationStoreError,
        UserDirectory,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Outcome counts of one dispatch pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Messages handed to the mailer.
    pub delivered: usize,
    /// Messages that failed and were rescheduled.
    pub retried: usize,
    /// Messages that failed for the last time.
    pub failed: usize,
}

/// Errors that abort a dispatch pass.
///
/// Delivery failures are recorded on the message and never surface here.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The outbox could not be read or updated.
    #[error(transparent)]
    Store(#[from] NotificationStoreError),
}

#[derive(Debug, Error)]
enum AttemptError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Message(#[from] NotificationDomainError),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

/// Drains due outbox messages into the mailer.
#[derive(Clone)]
pub struct OutboxDispatcher<O, D, M, C>
where
    O: NotificationOutbox,
    D: UserDirectory,
    M: Mailer,
    C: Clock + Send + Sync,
{
    outbox: Arc<O>,
    directory: Arc<D>,
    mailer: Arc<M>,
    clock: Arc<C>,
    renderer: EmailRenderer,
    policy: RetryPolicy,
}

impl<O, D, M, C> OutboxDispatcher<O, D, M, C>
where
    O: NotificationOutbox,
    D: UserDirectory,
    M: Mailer,
    C: Clock + Send + Sync,
{
    /// Creates a dispatcher using the default retry policy.
    #[must_use]
    pub fn new(outbox: Arc<O>, directory: Arc<D>, mailer: Arc<M>, clock: Arc<C>) -> Self {
        Self {
            outbox,
            directory,
            mailer,
            clock,
            renderer: EmailRenderer::new(),
            policy: RetryPolicy::default(),
        }
    }

    /// Replaces the retry policy.
    #[must_use]
    pub const fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Attempts delivery of up to `limit` due messages.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Store`] when the outbox cannot be read or a
    /// message's new state cannot be saved.
    pub async fn dispatch_due(&self, limit: usize) -> Result<DispatchReport, DispatchError> {
        let now = self.clock.utc();
        let due = self.outbox.due(now, limit).await?;
        debug!(count = due.len(), "dispatching due notifications");

        let mut report = DispatchReport::default();
        for mut message in due {
            match self.attempt(message.payload()).await {
                Ok(()) => {
                    message.mark_delivered(&*self.clock);
                    report.delivered += 1;
                    info!(
                        message_id = %message.id(),
                        kind = message.payload().kind(),
                        "notification delivered"
                    );
                }
                Err(err) => {
                    message.record_failure(err.to_string(), &self.policy, &*self.clock);
                    if message.status() == DeliveryStatus::Failed {
                        report.failed += 1;
                    } else {
                        report.retried += 1;
                    }
                    warn!(
                        message_id = %message.id(),
                        attempts = message.attempts(),
                        status = message.status().as_str(),
                        error = %err,
                        "notification delivery failed"
                    );
                }
            }
            self.outbox.update(&message).await?;
        }
        Ok(report)
    }

    async fn attempt(&self, payload: &NotificationPayload) -> Result<(), AttemptError> {
        let recipients = self.resolve_recipients(payload).await?;
        let rendered = self.renderer.render(payload)?;
        let email = EmailMessage::new(recipients, rendered.subject, rendered.body)?;
        self.mailer.send(&email).await?;
        Ok(())
    }

    async fn resolve_recipients(
        &self,
        payload: &NotificationPayload,
    ) -> Result<Vec<EmailAddress>, DirectoryError> {
        let mut addresses = Vec::new();
        for user_id in payload.recipients() {
            let address = self.directory.email_for(user_id).await?;
            if address.is_none() {
                debug!(user_id = %user_id, "recipient has no email address");
            }
            addresses.extend(address);
        }
        addresses.sort();
        addresses.dedup();
        Ok(addresses)
    }
}
