//! Curve25519 key pairs for Diffie-Hellman key agreement.

use base64::Engine;
use base64::engine::general_purpose::STANDARD_NO_PAD as BASE64;
use rand_core::{OsRng, RngCore};
use thresher_pickle::{Decoder, Encoder, Pickle, PickleError, Unpickle};
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::Zeroize;

use crate::error::CryptoError;

/// Length of a Curve25519 secret scalar.
pub const SECRET_KEY_LENGTH: usize = 32;

/// Length of a Curve25519 public point.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Serialized width of a key pair: public point then secret scalar,
/// the scalar zero-filled when absent.
pub const PICKLE_LENGTH: usize = PUBLIC_KEY_LENGTH + SECRET_KEY_LENGTH;

/// A Curve25519 key pair, possibly holding only its public half.
///
/// The secret scalar is stored as supplied and clamped at the point of
/// use, so serialized pairs round-trip byte-exactly. Constructors derive
/// the public key from the secret rather than accepting the two halves
/// independently; deserialization is the one path that trusts a stored
/// public key as-is.
///
/// Pairs are immutable once constructed. The secret scalar is zeroized
/// when the pair is dropped.
#[derive(Clone)]
pub struct Curve25519KeyPair {
    secret: Option<StaticSecret>,
    public: PublicKey,
}

impl Curve25519KeyPair {
    /// Generate a fresh key pair from the system random source.
    ///
    /// # Errors
    ///
    /// - `RandomSource`: secure randomness was unavailable
    pub fn generate() -> Result<Self, CryptoError> {
        let mut scalar = [0u8; SECRET_KEY_LENGTH];
        OsRng
            .try_fill_bytes(&mut scalar)
            .map_err(|err| CryptoError::RandomSource { reason: err.to_string() })?;

        let pair = Self::from_secret_bytes(scalar);
        scalar.zeroize();
        Ok(pair)
    }

    /// Build a pair from a caller-supplied secret scalar, deriving the
    /// public key.
    pub fn from_secret_bytes(scalar: [u8; SECRET_KEY_LENGTH]) -> Self {
        let secret = StaticSecret::from(scalar);
        let public = PublicKey::from(&secret);
        Self { secret: Some(secret), public }
    }

    /// Build a public-only pair, e.g. for a peer's published key.
    pub fn from_public(public: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self { secret: None, public: PublicKey::from(public) }
    }

    /// The public half.
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// The public point as raw bytes.
    pub fn public_key_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        self.public.as_bytes()
    }

    /// The secret scalar, if this pair holds one.
    pub fn secret_bytes(&self) -> Option<&[u8; SECRET_KEY_LENGTH]> {
        self.secret.as_ref().map(StaticSecret::as_bytes)
    }

    /// True if the secret half is present.
    pub fn has_secret(&self) -> bool {
        self.secret.is_some()
    }

    /// Compute the X25519 shared secret with a peer's public key.
    ///
    /// The peer point is accepted as-is: low-order points are not
    /// rejected and yield an all-zero secret. Existing exported session
    /// state depends on this permissive behavior, so contributory checks
    /// are left to the protocol layer.
    ///
    /// # Errors
    ///
    /// - `MissingSecretKey`: this pair holds only a public key
    pub fn shared_secret(&self, peer: &PublicKey) -> Result<[u8; 32], CryptoError> {
        let secret = self.secret.as_ref().ok_or(CryptoError::MissingSecretKey)?;
        Ok(secret.diffie_hellman(peer).to_bytes())
    }

    /// The public key as an unpadded base64 string, the form used as a
    /// key identifier by directory services.
    pub fn public_key_base64(&self) -> String {
        BASE64.encode(self.public.as_bytes())
    }
}

impl std::fmt::Debug for Curve25519KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Curve25519KeyPair")
            .field("public", &self.public_key_base64())
            .field("secret", &if self.has_secret() { "[REDACTED]" } else { "[NONE]" })
            .finish()
    }
}

// Not constant time; pair equality is session-state bookkeeping, not
// MAC verification.
impl PartialEq for Curve25519KeyPair {
    fn eq(&self, other: &Self) -> bool {
        let secrets_equal = match (&self.secret, &other.secret) {
            (Some(ours), Some(theirs)) => ours.as_bytes() == theirs.as_bytes(),
            (None, None) => true,
            _ => false,
        };
        secrets_equal && self.public.as_bytes() == other.public.as_bytes()
    }
}

impl Eq for Curve25519KeyPair {}

impl Pickle for Curve25519KeyPair {
    fn pickle(&self, encoder: &mut Encoder) {
        encoder.write(self.public.as_bytes());
        match &self.secret {
            Some(secret) => encoder.write(secret.as_bytes()),
            None => encoder.write_zeroes(SECRET_KEY_LENGTH),
        }
    }
}

impl Unpickle for Curve25519KeyPair {
    fn unpickle(input: &[u8]) -> Result<(Self, usize), PickleError> {
        let mut decoder = Decoder::new(input);
        let public: [u8; PUBLIC_KEY_LENGTH] = decoder.read_array()?;
        let mut scalar: [u8; SECRET_KEY_LENGTH] = decoder.read_array()?;

        // A zero-filled scalar block is the encoding of an absent secret.
        let secret = if scalar.iter().all(|&byte| byte == 0) {
            None
        } else {
            Some(StaticSecret::from(scalar))
        };
        scalar.zeroize();

        let pair = Self { secret, public: PublicKey::from(public) };
        Ok((pair, decoder.consumed()))
    }
}
