//! SMS one-time-code verification of phone numbers.
//!
//! Codes are six digits, stored only as a digest in a durable
//! [`ports::VerificationCodeStore`] with an expiry, and may not be resent
//! until a cooldown has passed. Repeated wrong guesses discard the code.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
