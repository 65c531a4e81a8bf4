//! Utility modules for the data layer
//!
//! General-purpose helpers for slices, numbers, JSON records and strings.
//! Every function is pure. Empty inputs produce a neutral value (an empty
//! collection, `0`, `false`) rather than an error; the few helpers that can
//! be called with arguments outside their domain return a [`UtilError`].

pub mod array;
pub mod number;
pub mod object;
pub mod string;

use thiserror::Error;

/// Contract violations raised by the utility helpers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UtilError {
    #[error("Step cannot be zero")]
    ZeroStep,

    #[error("Invalid arguments for {function}: {reason}")]
    InvalidArgument {
        function: &'static str,
        reason: String,
    },
}

/// Result type alias for utility helpers
pub type UtilResult<T> = Result<T, UtilError>;

impl UtilError {
    pub(crate) fn invalid(function: &'static str, reason: impl Into<String>) -> Self {
        UtilError::InvalidArgument {
            function,
            reason: reason.into(),
        }
    }
}

// Re-export commonly used items for convenience
pub use array::SortOrder;
pub use object::shallow_merge;
