//! Adapter implementations of the role transfer ports.

pub mod memory;
