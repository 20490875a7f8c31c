//! Domain model for review records.
//!
//! Tasks and work reports share one shape and one set of rules, so both are
//! represented by [`ReviewRecord`] tagged with a [`RecordKind`].

mod error;
mod ids;
mod money;
mod record;
mod status;

pub use error::{ParseReviewValueError, ReviewDomainError};
pub use ids::RecordId;
pub use money::{Earnings, Hours, Rate};
pub use record::{NewSubmission, PersistedReviewData, RateChange, ReviewRecord};
pub use status::{Decision, FinalStatus, RecordKind, TierReview};
