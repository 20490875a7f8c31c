//! Unit tests for the audit log.
