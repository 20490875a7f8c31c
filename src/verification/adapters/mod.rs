//! Adapter implementations of the verification ports.

pub mod memory;
