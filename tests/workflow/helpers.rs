//! Shared wiring for in-memory workflow tests.

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use mpcn_workforce::{
    audit::adapters::memory::InMemoryAuditLog,
    authority::domain::{AuthorizationContext, Role, UserId},
    identity::{adapters::memory::InMemoryUserAccounts, domain::UserAccount},
    notification::{
        adapters::memory::{InMemoryInAppNotifications, InMemoryOutbox, RecordingMailer},
        domain::EmailAddress,
        services::OutboxDispatcher,
    },
    review::{adapters::memory::InMemoryReviewRepository, services::ReviewWorkflowService},
};
use rstest::fixture;
use std::sync::{Arc, Mutex, PoisonError};

/// Password given to every seeded account.
pub const PASSWORD: &str = "correct horse battery staple";

/// Clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct SteppingClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl SteppingClock {
    /// Creates a clock pinned to 2024-03-04T08:00:00Z.
    #[must_use]
    pub fn new() -> Self {
        let start = Utc
            .with_ymd_and_hms(2024, 3, 4, 8, 0, 0)
            .single()
            .unwrap_or_else(Utc::now);
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Default for SteppingClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Review service wired to in-memory adapters.
pub type Reviews =
    ReviewWorkflowService<InMemoryReviewRepository, InMemoryAuditLog, InMemoryOutbox, SteppingClock>;

/// Dispatcher wired to in-memory adapters.
pub type Dispatcher =
    OutboxDispatcher<InMemoryOutbox, InMemoryUserAccounts, RecordingMailer, SteppingClock>;

/// Every in-memory adapter plus the services built on them.
pub struct Platform {
    pub clock: Arc<SteppingClock>,
    pub accounts: Arc<InMemoryUserAccounts>,
    pub records: Arc<InMemoryReviewRepository>,
    pub audit: Arc<InMemoryAuditLog>,
    pub outbox: Arc<InMemoryOutbox>,
    pub in_app: Arc<InMemoryInAppNotifications>,
    pub mailer: Arc<RecordingMailer>,
    pub reviews: Reviews,
    pub dispatcher: Dispatcher,
}

impl Platform {
    /// Builds a platform with no accounts.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(SteppingClock::new());
        let accounts = Arc::new(InMemoryUserAccounts::new());
        let records = Arc::new(InMemoryReviewRepository::new());
        let audit = Arc::new(InMemoryAuditLog::new());
        let outbox = Arc::new(InMemoryOutbox::new());
        let mailer = Arc::new(RecordingMailer::new());
        let reviews = ReviewWorkflowService::new(
            Arc::clone(&records),
            Arc::clone(&audit),
            Arc::clone(&outbox),
            Arc::clone(&clock),
        );
        let dispatcher = OutboxDispatcher::new(
            Arc::clone(&outbox),
            Arc::clone(&accounts),
            Arc::clone(&mailer),
            Arc::clone(&clock),
        );
        Self {
            clock,
            accounts,
            records,
            audit,
            outbox,
            in_app: Arc::new(InMemoryInAppNotifications::new()),
            mailer,
            reviews,
            dispatcher,
        }
    }

    /// Registers an account and returns its session context.
    ///
    /// # Errors
    ///
    /// Returns an error when the email is invalid or the store rejects the
    /// account.
    pub fn enrol(&self, email: &str, role: Role) -> eyre::Result<AuthorizationContext> {
        let user_id = UserId::new();
        let account = UserAccount::new(user_id, EmailAddress::new(email)?, email, role);
        self.accounts.insert(account, PASSWORD)?;
        Ok(AuthorizationContext::for_session(user_id, role))
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::new()
    }
}

/// Provides a fresh platform for each test.
#[fixture]
pub fn platform() -> Platform {
    Platform::new()
}
