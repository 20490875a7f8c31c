//! Domain model for pay periods and summaries.

mod error;
mod period;
mod summary;

pub use error::PayrollDomainError;
pub use period::PayPeriod;
pub use summary::PayrollSummary;
