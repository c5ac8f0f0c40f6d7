//! Error types for pickle encoding and decoding.

use thiserror::Error;

/// Result alias for pickle operations.
pub type Result<T> = std::result::Result<T, PickleError>;

/// Errors from decoding a pickled byte stream.
///
/// Encoding is infallible; only the decode path can reject input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PickleError {
    /// The buffer ended before the entity's fixed width was read.
    ///
    /// Indicates corrupt storage or bytes produced by a foreign format.
    #[error("pickle truncated at offset {offset}: needed {needed} more bytes")]
    Truncated {
        /// Offset into the buffer where the short read happened
        offset: usize,
        /// Bytes still required beyond the end of the buffer
        needed: usize,
    },

    /// A field decoded at the right offset and width but its bytes do not
    /// form valid key material.
    #[error("invalid {entity} in pickle")]
    InvalidKeyMaterial {
        /// The key material that failed validation
        entity: &'static str,
    },
}
