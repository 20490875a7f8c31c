//! Adapter implementations of the SLA ports.

pub mod memory;
