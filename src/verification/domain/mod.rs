//! Domain model for phone verification.

mod code;
mod entry;
mod error;
mod phone;

pub use code::{CodeDigest, VerificationCode};
pub use entry::VerificationEntry;
pub use error::VerificationDomainError;
pub use phone::PhoneNumber;
