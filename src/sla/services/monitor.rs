//! Periodic SLA sweep and request lifecycle.

use crate::audit::{
    domain::{AuditAction, AuditEvent, EntityRef, EntityType},
    ports::{AuditLog, AuditLogError},
};
use crate::authority::domain::{Capability, Role, UserId};
use crate::notification::{
    domain::{InAppNotification, NotificationPayload, OutboxMessage, SlaAlert, SlaAlertKind},
    ports::{
        DirectoryError, InAppNotifications, NotificationOutbox, NotificationStoreError,
        UserDirectory,
    },
};
use crate::sla::{
    domain::{ResolutionRequest, ResolutionRequestId, SlaDomainError},
    ports::{ResolutionRequestRepository, ResolutionRequestRepositoryError},
};
use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use serde_json::json;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Service-level errors for SLA monitoring.
#[derive(Debug, Error)]
pub enum SlaMonitorError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] SlaDomainError),
    /// Request persistence failed.
    #[error(transparent)]
    Repository(#[from] ResolutionRequestRepositoryError),
    /// Recipient lookup failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    /// Outbox or in-app store failed.
    #[error(transparent)]
    Notification(#[from] NotificationStoreError),
    /// The audit log rejected an event.
    #[error(transparent)]
    Audit(#[from] AuditLogError),
    /// The request does not exist.
    #[error("resolution request not found: {0}")]
    NotFound(ResolutionRequestId),
}

/// Result type for SLA monitor operations.
pub type SlaMonitorResult<T> = Result<T, SlaMonitorError>;

/// Alerts raised by one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Breach alerts raised.
    pub breaches: usize,
    /// Approaching alerts raised.
    pub warnings: usize,
}

/// Watches open resolution requests and alerts admin-tier users.
#[derive(Clone)]
pub struct SlaMonitor<R, D, O, N, L, C>
where
    R: ResolutionRequestRepository,
    D: UserDirectory,
    O: NotificationOutbox,
    N: InAppNotifications,
    L: AuditLog,
    C: Clock + Send + Sync,
{
    requests: Arc<R>,
    directory: Arc<D>,
    outbox: Arc<O>,
    in_app: Arc<N>,
    audit: Arc<L>,
    clock: Arc<C>,
    warning_window: Duration,
}

impl<R, D, O, N, L, C> SlaMonitor<R, D, O, N, L, C>
where
    R: ResolutionRequestRepository,
    D: UserDirectory,
    O: NotificationOutbox,
    N: InAppNotifications,
    L: AuditLog,
    C: Clock + Send + Sync,
{
    /// Creates a monitor warning 24 hours before the due time.
    #[must_use]
    pub fn new(
        requests: Arc<R>,
        directory: Arc<D>,
        outbox: Arc<O>,
        in_app: Arc<N>,
        audit: Arc<L>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            requests,
            directory,
            outbox,
            in_app,
            audit,
            clock,
            warning_window: Duration::hours(24),
        }
    }

    /// Overrides how long before the due time an approaching alert fires.
    #[must_use]
    pub const fn with_warning_window(mut self, window: Duration) -> Self {
        self.warning_window = window;
        self
    }

    /// Opens a request due at `sla_due`.
    ///
    /// # Errors
    ///
    /// Returns [`SlaMonitorError::Domain`] for a blank title and
    /// [`SlaMonitorError::Repository`] when storing fails.
    pub async fn open(
        &self,
        requester: UserId,
        title: &str,
        sla_due: DateTime<Utc>,
    ) -> SlaMonitorResult<ResolutionRequest> {
        let request = ResolutionRequest::open(title, requester, sla_due, &*self.clock)?;
        self.requests.store(&request).await?;
        Ok(request)
    }

    /// Closes a request so later sweeps ignore it.
    ///
    /// # Errors
    ///
    /// Returns [`SlaMonitorError::NotFound`] for an unknown request and
    /// [`SlaMonitorError::Domain`] when it is already resolved.
    pub async fn resolve(&self, id: ResolutionRequestId) -> SlaMonitorResult<ResolutionRequest> {
        let mut request = self
            .requests
            .find_by_id(id)
            .await?
            .ok_or(SlaMonitorError::NotFound(id))?;
        request.resolve(&*self.clock)?;
        self.requests.update(&request).await?;
        Ok(request)
    }

    /// Raises every alert owed at the current time.
    ///
    /// # Errors
    ///
    /// Returns [`SlaMonitorError`] when a store or the directory fails. Alerts
    /// raised before the failure stay raised, and the request being alerted
    /// when the outbox or in-app store failed stays stamped.
    pub async fn sweep(&self) -> SlaMonitorResult<SweepReport> {
        let now = self.clock.utc();
        let open = self.requests.list_open().await?;
        debug!(open = open.len(), "sweeping resolution requests");

        let owed: Vec<(ResolutionRequest, SlaAlertKind)> = open
            .into_iter()
            .filter_map(|request| {
                request
                    .alert_due(now, self.warning_window)
                    .map(|kind| (request, kind))
            })
            .collect();

        let mut report = SweepReport::default();
        if owed.is_empty() {
            return Ok(report);
        }
        let recipients = self.alert_recipients().await?;
        for (mut request, kind) in owed {
            self.raise(&mut request, kind, &recipients).await?;
            match kind {
                SlaAlertKind::Breach => report.breaches += 1,
                SlaAlertKind::Approaching => report.warnings += 1,
            }
        }
        Ok(report)
    }

    async fn alert_recipients(&self) -> Result<Vec<UserId>, DirectoryError> {
        let mut recipients = BTreeSet::new();
        let alerted_roles = Role::ALL
            .into_iter()
            .filter(|role| role.capabilities().contains(&Capability::ReceiveSlaAlerts));
        for role in alerted_roles {
            recipients.extend(self.directory.users_with_role(role).await?);
        }
        Ok(recipients.into_iter().collect())
    }

    async fn raise(
        &self,
        request: &mut ResolutionRequest,
        kind: SlaAlertKind,
        recipients: &[UserId],
    ) -> SlaMonitorResult<()> {
        // Persisted first: a sweep never raises the same alert twice.
        request.mark_alerted(kind, &*self.clock);
        self.requests.update(request).await?;

        let entity = EntityRef::new(EntityType::ResolutionRequest, request.id().into_inner());
        if let Err(err) = self.notify(request, kind, recipients, entity).await {
            warn!(
                request_id = %request.id(),
                kind = kind.as_str(),
                error = %err,
                "SLA alert stamped but not fully delivered"
            );
            return Err(err);
        }

        let event = AuditEvent::new(entity, AuditAction::SlaAlertRaised, &*self.clock)
            .with_new_value(json!({
                "kind": kind.as_str(),
                "recipients": recipients.len(),
            }));
        self.audit.append(&event).await?;
        info!(
            request_id = %request.id(),
            kind = kind.as_str(),
            recipients = recipients.len(),
            "SLA alert raised"
        );
        Ok(())
    }

    async fn notify(
        &self,
        request: &ResolutionRequest,
        kind: SlaAlertKind,
        recipients: &[UserId],
        entity: EntityRef,
    ) -> SlaMonitorResult<()> {
        if recipients.is_empty() {
            warn!(request_id = %request.id(), "no users receive SLA alerts");
            return Ok(());
        }
        let alert = SlaAlert {
            request_id: request.id().into_inner(),
            title: request.title().to_owned(),
            sla_due: request.sla_due(),
            kind,
            recipients: recipients.to_vec(),
        };
        let message = OutboxMessage::new(NotificationPayload::SlaAlert(alert), &*self.clock);
        self.outbox.enqueue(&message).await?;

        let (title, body) = in_app_text(request, kind);
        for user_id in recipients {
            let row = InAppNotification::new(*user_id, title.clone(), body.clone(), &*self.clock)
                .with_related(entity);
            self.in_app.insert(&row).await?;
        }
        Ok(())
    }
}

fn in_app_text(request: &ResolutionRequest, kind: SlaAlertKind) -> (String, String) {
    let due = request.sla_due().format("%Y-%m-%d %H:%M UTC");
    match kind {
        SlaAlertKind::Breach => (
            "SLA breached".to_owned(),
            format!("\"{}\" passed its SLA due time of {due}.", request.title()),
        ),
        SlaAlertKind::Approaching => (
            "SLA approaching".to_owned(),
            format!("\"{}\" is due by {due}.", request.title()),
        ),
    }
}
