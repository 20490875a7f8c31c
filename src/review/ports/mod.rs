//! Port contracts for the review workflow.
//!
//! Ports define infrastructure-agnostic interfaces used by review services.

pub mod repository;

pub use repository::{ReviewRepository, ReviewRepositoryError, ReviewRepositoryResult};

#[cfg(test)]
pub use repository::MockReviewRepository;
