//! Adapter implementations for the audit log port.

pub mod memory;
pub mod postgres;
