//! SLA monitoring services.

mod monitor;

pub use monitor::{SlaMonitor, SlaMonitorError, SweepReport};
