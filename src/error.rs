//! Error types for time values

use std::fmt;

use thiserror::Error;

/// Result type alias for time operations
pub type Result<T> = std::result::Result<T, TimeError>;

/// Which checked arithmetic operation overflowed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Addition,
    Subtraction,
}

impl fmt::Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArithOp::Addition => write!(f, "addition"),
            ArithOp::Subtraction => write!(f, "subtraction"),
        }
    }
}

/// Main error type for time value operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimeError {
    #[error("cannot convert {0} to time")]
    TypeMismatch(String),

    #[error("{0}")]
    Range(String),

    #[error("time_t overflow in Time {op}")]
    Overflow { op: ArithOp },

    #[error("uninitialized time")]
    Uninitialized,

    #[error("wrong argument class: expected {expected}, got {found}")]
    IdentityMismatch { expected: String, found: String },

    #[error("{0}")]
    Unrepresentable(String),

    #[error("Invalid profile: {0}")]
    Config(String),
}

impl TimeError {
    /// Range error for a value that has no instant on this platform.
    pub(crate) fn out_of_range(value: impl fmt::Display) -> Self {
        TimeError::Range(format!("{} out of Time range", value))
    }
}
