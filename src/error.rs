//! Error types.
//!
//! Scanning, allocation and lookup never fail. Parsing a string back into an
//! [`AllocatedCode`](crate::codes::AllocatedCode) can.

use thiserror::Error;

/// Why a string is not a `PREFIX-SEQ` code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeParseError {
    #[error("missing '-' separator in code: {0}")]
    MissingSeparator(String),

    #[error("prefix must be 1-3 uppercase characters: {0:?}")]
    InvalidPrefix(String),

    #[error("sequence is not a decimal number: {0:?}")]
    InvalidSequence(String),
}
