//! Thresher Pickle Format
//!
//! Fixed-layout binary serialization for cryptographic session state.
//! "Pickling" writes an entity's fields in a fixed order at fixed widths:
//! no length prefixes, no type tags, no version markers. A given entity
//! type always serializes to the same number of bytes, and every field
//! sits at the same offset in every pickle of that type.
//!
//! Two rules make the layout positionally stable:
//!
//! - Absent optional fields (a key pair that holds only its public half)
//!   are written as zero-filled blocks of their nominal width, never
//!   omitted.
//! - Decoding reads the same fixed widths back in the same order and
//!   reports how many bytes it consumed, so callers can lay multiple
//!   records back-to-back in one buffer and chain decodes.
//!
//! This is an interoperability contract: the byte stream must match the
//! session exports of existing implementations field for field. Format
//! evolution (versioning, migration) is owned by the account/session
//! layer that embeds these bytes, not by this crate.
//!
//! The pickles produced here are plaintext. The passphrase-derived outer
//! encryption applied to exported session state wraps these bytes and
//! lives with the caller.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod decode;
pub mod encode;
pub mod errors;

pub use decode::Decoder;
pub use encode::Encoder;
pub use errors::{PickleError, Result};

/// Serialize into the fixed positional pickle layout.
pub trait Pickle {
    /// Append this value's fixed-width fields to the encoder.
    ///
    /// Implementations must emit the same byte count regardless of which
    /// optional sub-values are populated, zero-filling absent fields.
    fn pickle(&self, encoder: &mut Encoder);
}

/// Deserialize from the fixed positional pickle layout.
pub trait Unpickle: Sized {
    /// Read this entity's fields from the start of `input`.
    ///
    /// Returns the decoded value and the number of bytes consumed, so the
    /// caller can locate the next record in a concatenated buffer.
    /// Trailing bytes beyond the entity's fixed width are left untouched.
    ///
    /// # Errors
    ///
    /// - [`PickleError::Truncated`] if `input` is shorter than the
    ///   entity's fixed width
    /// - [`PickleError::InvalidKeyMaterial`] if a field decodes
    ///   positionally but does not form a valid key
    fn unpickle(input: &[u8]) -> Result<(Self, usize)>;
}

/// Pickle a value into a fresh byte vector.
pub fn pickle_to_vec<T: Pickle>(value: &T) -> Vec<u8> {
    let mut encoder = Encoder::new();
    value.pickle(&mut encoder);
    encoder.into_bytes()
}
