//! Adapter implementations for the review repository port.

pub mod memory;
pub mod postgres;
