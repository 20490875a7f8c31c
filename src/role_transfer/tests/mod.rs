//! Unit tests for role transfers.
