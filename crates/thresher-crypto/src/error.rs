//! Error types for key generation, derivation, and authenticated
//! encryption.

use thiserror::Error;

/// Errors from the cryptographic primitive layer.
///
/// Signature and MAC verification failures are NOT errors: they are
/// reported as booleans because a message that fails to authenticate is
/// an ordinary, expected outcome the caller must check. Nothing in this
/// layer is retried internally; retry policy belongs to the session and
/// account layers.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The operating system's entropy source was unavailable.
    #[error("secure random source unavailable: {reason}")]
    RandomSource {
        /// Report from the underlying random source
        reason: String,
    },

    /// The key-derivation function could not produce the requested
    /// output length. Indicates a broken primitive, not bad input.
    #[error("key derivation produced fewer than {requested} bytes")]
    KeyDerivation {
        /// Output length that was requested from the KDF
        requested: usize,
    },

    /// The block cipher rejected the derived key or IV.
    #[error("encryption failed: {reason}")]
    Encryption {
        /// What the cipher rejected
        reason: &'static str,
    },

    /// The ciphertext failed length or padding checks.
    #[error("decryption failed: {reason}")]
    Decryption {
        /// Which check failed
        reason: &'static str,
    },

    /// An operation requiring the secret half was invoked on a pair that
    /// holds only its public key.
    #[error("key pair holds only a public key")]
    MissingSecretKey,

    /// Bytes supplied as a public key do not decode to a valid point.
    #[error("invalid {scheme} public key encoding")]
    InvalidPublicKey {
        /// Signature or agreement scheme the bytes were meant for
        scheme: &'static str,
    },
}

impl CryptoError {
    /// Returns true if this error is fatal (unrecoverable).
    ///
    /// A failed decryption is recoverable at the protocol layer by
    /// treating the message as undecryptable. Everything else indicates
    /// a broken primitive or caller bug.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Decryption { .. })
    }
}
