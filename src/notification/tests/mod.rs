//! Unit tests for notifications.
