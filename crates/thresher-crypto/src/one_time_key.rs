//! Lifecycle records for pre-published one-time agreement keys.

use base64::Engine;
use base64::engine::general_purpose::STANDARD_NO_PAD as BASE64;
use thresher_pickle::{Decoder, Encoder, Pickle, PickleError, Unpickle};

use crate::curve25519::{self, Curve25519KeyPair};

/// Serialized width of a record: id, published flag, then the embedded
/// key pair.
pub const PICKLE_LENGTH: usize = 4 + 1 + curve25519::PICKLE_LENGTH;

/// A one-time key with its publication bookkeeping.
///
/// The owning account assigns sequential ids and keeps them unique
/// within its key table; this record only carries the value. Records
/// are treated as immutable: flipping `published` after upload is the
/// account store's job, done by replacing the record or under its own
/// synchronization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OneTimeKey {
    /// Sequential identifier assigned by the owning account.
    pub id: u32,
    /// Whether the key has been uploaded to the directory service.
    pub published: bool,
    /// The agreement key pair itself.
    pub key: Curve25519KeyPair,
}

impl OneTimeKey {
    /// Wrap a freshly generated key pair as an unpublished record.
    pub fn new(id: u32, key: Curve25519KeyPair) -> Self {
        Self { id, published: false, key }
    }

    /// The id as an unpadded base64 string over its four big-endian
    /// bytes, the form used when uploading to a directory service.
    pub fn key_id_base64(&self) -> String {
        BASE64.encode(self.id.to_be_bytes())
    }

    /// The embedded public key in its unpadded base64 identifier form.
    pub fn public_key_base64(&self) -> String {
        self.key.public_key_base64()
    }
}

impl Pickle for OneTimeKey {
    fn pickle(&self, encoder: &mut Encoder) {
        encoder.write_u32(self.id);
        encoder.write_bool(self.published);
        self.key.pickle(encoder);
    }
}

impl Unpickle for OneTimeKey {
    fn unpickle(input: &[u8]) -> Result<(Self, usize), PickleError> {
        let mut decoder = Decoder::new(input);
        let id = decoder.read_u32()?;
        let published = decoder.read_bool()?;
        let (key, read) = Curve25519KeyPair::unpickle(decoder.rest())?;

        Ok((Self { id, published, key }, decoder.consumed() + read))
    }
}
