//! Port contracts for resolution request persistence.

pub mod repository;

pub use repository::{
    ResolutionRequestRepository, ResolutionRequestRepositoryError,
    ResolutionRequestRepositoryResult,
};
