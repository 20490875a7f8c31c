//! Unit tests for SLA monitoring.
