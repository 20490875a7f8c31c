//! Unit tests for sign-in resolution.
