//! Domain model for resolution requests.

mod error;
mod request;

pub use error::{ParseSlaValueError, SlaDomainError};
pub use request::{
    PersistedResolutionRequestData, RequestStatus, ResolutionRequest, ResolutionRequestId,
};
