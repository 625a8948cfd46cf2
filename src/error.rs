//! Error types for ordered map operations.
//!
//! Every fallible operation on [`OrderedMap`](crate::OrderedMap) reports one of
//! these discriminators synchronously. The map never logs or retries; callers
//! decide whether an out-of-memory result is fatal.

use thiserror::Error;

/// Which kind of element a failed copy was producing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    /// A key copy (`copy_key`) failed
    Key,
    /// A value copy (`copy_data`) failed
    Value,
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Element::Key => f.write_str("key"),
            Element::Value => f.write_str("value"),
        }
    }
}

/// Errors that can occur during map operations.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// A required callback was missing when assembling a capability set.
    #[error("Missing required argument: {argument}")]
    NullArgument {
        /// Name of the absent argument
        argument: &'static str,
    },

    /// A copy callback failed. The operation had no partial effect.
    #[error("Out of memory while copying a {element}")]
    OutOfMemory {
        /// The element that could not be copied
        element: Element,
    },

    /// No stored key compares equal to the requested key.
    #[error("Item does not exist")]
    ItemDoesNotExist,
}

impl MapError {
    /// Check if this error is an out-of-memory error
    pub fn is_out_of_memory(&self) -> bool {
        matches!(self, MapError::OutOfMemory { .. })
    }

    /// Check if this error reports a missing key
    pub fn is_not_found(&self) -> bool {
        matches!(self, MapError::ItemDoesNotExist)
    }

    /// Check if this error reports a missing argument
    pub fn is_null_argument(&self) -> bool {
        matches!(self, MapError::NullArgument { .. })
    }
}
