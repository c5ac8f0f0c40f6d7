//! Ed25519 key pairs for signing and verification.

use base64::Engine;
use base64::engine::general_purpose::STANDARD_NO_PAD as BASE64;
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand_core::{OsRng, RngCore};
use thresher_pickle::{Decoder, Encoder, Pickle, PickleError, Unpickle};
use zeroize::Zeroize;

use crate::error::CryptoError;

/// Length of an Ed25519 seed.
pub const SEED_LENGTH: usize = 32;

/// Length of an Ed25519 public key.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Length of the serialized private field: the seed followed by the
/// public key it determines, the layout existing session exports carry.
pub const KEYPAIR_LENGTH: usize = 64;

/// Length of an Ed25519 signature.
pub const SIGNATURE_LENGTH: usize = 64;

/// Serialized width of a key pair: public key then keypair encoding,
/// the latter zero-filled when the signing half is absent.
pub const PICKLE_LENGTH: usize = PUBLIC_KEY_LENGTH + KEYPAIR_LENGTH;

/// An Ed25519 key pair, possibly holding only its verifying half.
///
/// Same lifecycle as [`crate::Curve25519KeyPair`]: constructed by random
/// generation or by deriving from a supplied seed, immutable thereafter.
#[derive(Clone)]
pub struct Ed25519KeyPair {
    signing: Option<SigningKey>,
    verifying: VerifyingKey,
}

impl Ed25519KeyPair {
    /// Generate a fresh key pair from the system random source.
    ///
    /// # Errors
    ///
    /// - `RandomSource`: secure randomness was unavailable
    pub fn generate() -> Result<Self, CryptoError> {
        let mut seed = [0u8; SEED_LENGTH];
        OsRng
            .try_fill_bytes(&mut seed)
            .map_err(|err| CryptoError::RandomSource { reason: err.to_string() })?;

        let pair = Self::from_seed(seed);
        seed.zeroize();
        Ok(pair)
    }

    /// Build a pair from a caller-supplied seed, deriving the verifying
    /// key.
    pub fn from_seed(seed: [u8; SEED_LENGTH]) -> Self {
        let signing = SigningKey::from_bytes(&seed);
        let verifying = signing.verifying_key();
        Self { signing: Some(signing), verifying }
    }

    /// Build a verifying-only pair, e.g. for a peer's identity key.
    ///
    /// # Errors
    ///
    /// - `InvalidPublicKey`: the bytes are not a valid point encoding
    pub fn from_public(public: &[u8; PUBLIC_KEY_LENGTH]) -> Result<Self, CryptoError> {
        let verifying = VerifyingKey::from_bytes(public)
            .map_err(|_| CryptoError::InvalidPublicKey { scheme: "ed25519" })?;
        Ok(Self { signing: None, verifying })
    }

    /// The verifying half.
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying
    }

    /// The verifying key as raw bytes.
    pub fn public_key_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        self.verifying.as_bytes()
    }

    /// True if the signing half is present.
    pub fn has_secret(&self) -> bool {
        self.signing.is_some()
    }

    /// Sign `message`, returning the detached 64-byte signature.
    ///
    /// # Errors
    ///
    /// - `MissingSecretKey`: this pair holds only a verifying key
    pub fn sign(&self, message: &[u8]) -> Result<[u8; SIGNATURE_LENGTH], CryptoError> {
        let signing = self.signing.as_ref().ok_or(CryptoError::MissingSecretKey)?;
        Ok(signing.sign(message).to_bytes())
    }

    /// Check `signature` over `message` against the verifying key.
    ///
    /// A failed verification is an expected outcome, so the result is a
    /// boolean, never an error. Signatures of the wrong length are
    /// simply invalid.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        let Ok(bytes) = <[u8; SIGNATURE_LENGTH]>::try_from(signature) else {
            return false;
        };
        let signature = Signature::from_bytes(&bytes);
        self.verifying.verify(message, &signature).is_ok()
    }

    /// The verifying key as an unpadded base64 string, the externally
    /// visible identity-key form.
    pub fn public_key_base64(&self) -> String {
        BASE64.encode(self.verifying.as_bytes())
    }
}

impl std::fmt::Debug for Ed25519KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ed25519KeyPair")
            .field("public", &self.public_key_base64())
            .field("signing", &if self.has_secret() { "[REDACTED]" } else { "[NONE]" })
            .finish()
    }
}

impl PartialEq for Ed25519KeyPair {
    fn eq(&self, other: &Self) -> bool {
        let signing_equal = match (&self.signing, &other.signing) {
            (Some(ours), Some(theirs)) => ours.to_bytes() == theirs.to_bytes(),
            (None, None) => true,
            _ => false,
        };
        signing_equal && self.verifying.as_bytes() == other.verifying.as_bytes()
    }
}

impl Eq for Ed25519KeyPair {}

impl Pickle for Ed25519KeyPair {
    fn pickle(&self, encoder: &mut Encoder) {
        encoder.write(self.verifying.as_bytes());
        match &self.signing {
            Some(signing) => encoder.write(&signing.to_keypair_bytes()),
            None => encoder.write_zeroes(KEYPAIR_LENGTH),
        }
    }
}

impl Unpickle for Ed25519KeyPair {
    fn unpickle(input: &[u8]) -> Result<(Self, usize), PickleError> {
        let mut decoder = Decoder::new(input);
        let public: [u8; PUBLIC_KEY_LENGTH] = decoder.read_array()?;
        let mut keypair: [u8; KEYPAIR_LENGTH] = decoder.read_array()?;

        let verifying = VerifyingKey::from_bytes(&public)
            .map_err(|_| PickleError::InvalidKeyMaterial { entity: "ed25519 public key" })?;

        // A zero-filled keypair block is the encoding of an absent
        // signing key.
        let signing = if keypair.iter().all(|&byte| byte == 0) {
            None
        } else {
            Some(
                SigningKey::from_keypair_bytes(&keypair)
                    .map_err(|_| PickleError::InvalidKeyMaterial { entity: "ed25519 key pair" })?,
            )
        };
        keypair.zeroize();

        let pair = Self { signing, verifying };
        Ok((pair, decoder.consumed()))
    }
}
