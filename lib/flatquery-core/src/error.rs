//! Error types for flatquery.

use std::fmt;

use derive_more::{Display, Error};

// ============================================================================
// Error Type
// ============================================================================

/// Main error type for flatquery operations.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum Error {
    /// The top-level input is not a usable structured value once dereferenced.
    #[display("invalid value")]
    InvalidValue,

    /// The input nests deeper than the configured maximum.
    #[display("value nesting exceeds maximum depth of {max}")]
    DepthExceeded {
        /// Configured maximum depth.
        max: usize,
    },

    /// Capturing a `serde::Serialize` value failed.
    #[display("capture error: {_0}")]
    Capture(#[error(not(source))] String),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a capture error.
    #[must_use]
    pub fn capture(message: impl Into<String>) -> Self {
        Self::Capture(message.into())
    }

    /// Returns `true` if this is an invalid value error.
    #[must_use]
    pub const fn is_invalid_value(&self) -> bool {
        matches!(self, Self::InvalidValue)
    }

    /// Returns `true` if this error reports a nesting overflow.
    #[must_use]
    pub const fn is_depth_exceeded(&self) -> bool {
        matches!(self, Self::DepthExceeded { .. })
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Self::Capture(msg.to_string())
    }
}
