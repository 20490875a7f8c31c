//! Error types for parsing persisted audit values.

use thiserror::Error;

/// Error returned while parsing audit entity types or actions from storage.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown audit {kind}: {value}")]
pub struct ParseAuditValueError {
    /// Which enumeration failed to parse.
    pub kind: &'static str,
    /// The rejected value.
    pub value: String,
}
