//! Phone verification orchestration.

mod verify;

pub use verify::{SendOutcome, VerificationError, VerificationService, VerificationSettings};
