//! Unit tests for the authority domain.
