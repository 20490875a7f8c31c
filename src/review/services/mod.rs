//! Application services for the review workflow.

mod requests;
mod workflow;

pub use requests::{
    OverrideRequest, RateAdjustmentRequest, SubmitWorkRequest, TeamLeadReviewRequest,
};
pub use workflow::{ReviewWorkflowError, ReviewWorkflowResult, ReviewWorkflowService};
