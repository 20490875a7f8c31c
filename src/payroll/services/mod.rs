//! Payroll services.

mod summary;

pub use summary::{PayrollError, PayrollService};
