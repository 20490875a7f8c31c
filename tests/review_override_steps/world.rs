//! Shared world state for review override BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use mpcn_workforce::{
    audit::adapters::memory::InMemoryAuditLog,
    authority::domain::{AuthorizationContext, Role, UserId},
    notification::adapters::memory::InMemoryOutbox,
    review::{
        adapters::memory::InMemoryReviewRepository,
        domain::ReviewRecord,
        services::{ReviewWorkflowError, ReviewWorkflowService},
    },
};
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestReviewService = ReviewWorkflowService<
    InMemoryReviewRepository,
    InMemoryAuditLog,
    InMemoryOutbox,
    DefaultClock,
>;

/// Scenario world for override behaviour tests.
pub struct OverrideWorld {
    pub service: TestReviewService,
    pub outbox: Arc<InMemoryOutbox>,
    pub employee: AuthorizationContext,
    pub team_lead: AuthorizationContext,
    pub admin: AuthorizationContext,
    pub overseer: AuthorizationContext,
    pub record: Option<ReviewRecord>,
    pub last_override: Option<Result<ReviewRecord, ReviewWorkflowError>>,
}

impl OverrideWorld {
    /// Creates a world with one user per role and no records.
    #[must_use]
    pub fn new() -> Self {
        let outbox = Arc::new(InMemoryOutbox::new());
        let service = ReviewWorkflowService::new(
            Arc::new(InMemoryReviewRepository::new()),
            Arc::new(InMemoryAuditLog::new()),
            Arc::clone(&outbox),
            Arc::new(DefaultClock),
        );

        Self {
            service,
            outbox,
            employee: AuthorizationContext::for_session(UserId::new(), Role::Employee),
            team_lead: AuthorizationContext::for_session(UserId::new(), Role::TeamLead),
            admin: AuthorizationContext::for_session(UserId::new(), Role::Admin),
            overseer: AuthorizationContext::for_session(UserId::new(), Role::GeneralOverseer),
            record: None,
            last_override: None,
        }
    }

    /// Returns the record under test.
    ///
    /// # Errors
    ///
    /// Returns an error when no record was submitted in the scenario.
    pub fn record(&self) -> Result<&ReviewRecord, eyre::Report> {
        self.record
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing submitted record in scenario world"))
    }
}

impl Default for OverrideWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> OverrideWorld {
    OverrideWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
