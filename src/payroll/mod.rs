//! Earnings summaries over reviewed work.
//!
//! Payroll reads review records through the review repository port; it owns
//! no storage of its own. Only records whose final status is approved count
//! towards earnings.

pub mod domain;
pub mod services;
