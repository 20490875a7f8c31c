//! Port contracts for code storage and SMS delivery.

pub mod sms;
pub mod store;

pub use sms::{SmsError, SmsGateway};
pub use store::{VerificationCodeStore, VerificationStoreError, VerificationStoreResult};

#[cfg(test)]
pub use sms::MockSmsGateway;
