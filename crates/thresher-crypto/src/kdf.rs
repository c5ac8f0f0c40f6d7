//! Key derivation for the authenticated cipher using HKDF-SHA256.

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::Zeroize;

use crate::error::CryptoError;

/// Length of the derived AES-256 key.
pub const CIPHER_KEY_LENGTH: usize = 32;

/// Length of the derived HMAC-SHA256 key.
pub const MAC_KEY_LENGTH: usize = 32;

/// Length of the derived CBC initialization vector.
pub const IV_LENGTH: usize = 16;

const DERIVED_LENGTH: usize = CIPHER_KEY_LENGTH + MAC_KEY_LENGTH + IV_LENGTH;

/// Key material expanded from one master secret for one usage domain.
///
/// A single HKDF-SHA256 expansion (empty salt, caller-supplied context
/// as the info parameter) produces an 80-byte stream that is split, in
/// order, into the cipher key (bytes 0-31), the MAC key (bytes 32-63),
/// and the IV (bytes 64-79). Other implementations of this ratchet
/// depend on exactly this split, so the layout is a wire-level contract.
///
/// Derived keys are ephemeral: they are never serialized and are
/// zeroized on drop.
pub struct DerivedKeys {
    cipher_key: [u8; CIPHER_KEY_LENGTH],
    mac_key: [u8; MAC_KEY_LENGTH],
    iv: [u8; IV_LENGTH],
}

impl DerivedKeys {
    /// Expand `master_secret` under the `info` context string.
    ///
    /// The IV comes out of the KDF, not a random source: deriving twice
    /// from the same (`master_secret`, `info`) pair yields the same key
    /// and IV. Callers must guarantee a fresh master secret or a fresh
    /// context per encrypted plaintext.
    ///
    /// # Errors
    ///
    /// - `KeyDerivation`: the KDF could not fill the 80-byte stream
    pub fn derive(master_secret: &[u8], info: &[u8]) -> Result<Self, CryptoError> {
        let hkdf = Hkdf::<Sha256>::new(None, master_secret);

        let mut stream = [0u8; DERIVED_LENGTH];
        hkdf.expand(info, &mut stream)
            .map_err(|_| CryptoError::KeyDerivation { requested: DERIVED_LENGTH })?;

        let mut cipher_key = [0u8; CIPHER_KEY_LENGTH];
        let mut mac_key = [0u8; MAC_KEY_LENGTH];
        let mut iv = [0u8; IV_LENGTH];
        cipher_key.copy_from_slice(&stream[..CIPHER_KEY_LENGTH]);
        mac_key.copy_from_slice(&stream[CIPHER_KEY_LENGTH..CIPHER_KEY_LENGTH + MAC_KEY_LENGTH]);
        iv.copy_from_slice(&stream[CIPHER_KEY_LENGTH + MAC_KEY_LENGTH..]);
        stream.zeroize();

        Ok(Self { cipher_key, mac_key, iv })
    }

    /// 32-byte AES-256 key.
    pub fn cipher_key(&self) -> &[u8; CIPHER_KEY_LENGTH] {
        &self.cipher_key
    }

    /// 32-byte HMAC-SHA256 key.
    pub fn mac_key(&self) -> &[u8; MAC_KEY_LENGTH] {
        &self.mac_key
    }

    /// 16-byte CBC initialization vector.
    pub fn iv(&self) -> &[u8; IV_LENGTH] {
        &self.iv
    }
}

impl Drop for DerivedKeys {
    fn drop(&mut self) {
        self.cipher_key.zeroize();
        self.mac_key.zeroize();
        self.iv.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_secret() -> [u8; 32] {
        let mut secret = [0u8; 32];
        for (i, byte) in secret.iter_mut().enumerate() {
            *byte = i as u8;
        }
        secret
    }

    #[test]
    fn derive_is_deterministic() {
        let secret = test_secret();
        let first = DerivedKeys::derive(&secret, b"RATCHET").unwrap();
        let second = DerivedKeys::derive(&secret, b"RATCHET").unwrap();

        assert_eq!(first.cipher_key(), second.cipher_key());
        assert_eq!(first.mac_key(), second.mac_key());
        assert_eq!(first.iv(), second.iv());
    }

    #[test]
    fn different_contexts_produce_unrelated_keys() {
        let secret = test_secret();
        let keys = DerivedKeys::derive(&secret, b"KEYS").unwrap();
        let ratchet = DerivedKeys::derive(&secret, b"RATCHET").unwrap();

        assert_ne!(keys.cipher_key(), ratchet.cipher_key());
        assert_ne!(keys.mac_key(), ratchet.mac_key());
        assert_ne!(keys.iv(), ratchet.iv());
    }

    #[test]
    fn different_secrets_produce_unrelated_keys() {
        let keys_a = DerivedKeys::derive(&[0xAA; 32], b"TEST").unwrap();
        let keys_b = DerivedKeys::derive(&[0xBB; 32], b"TEST").unwrap();

        assert_ne!(keys_a.cipher_key(), keys_b.cipher_key());
    }

    #[test]
    fn works_with_empty_master_secret() {
        let keys = DerivedKeys::derive(&[], b"TEST").unwrap();
        assert_eq!(keys.cipher_key().len(), CIPHER_KEY_LENGTH);
    }

    #[test]
    fn works_with_large_master_secret() {
        let large = vec![0xCDu8; 1024];
        let keys = DerivedKeys::derive(&large, b"TEST").unwrap();
        assert_eq!(keys.iv().len(), IV_LENGTH);
    }

    // The 32/32/16 split of the 80-byte stream, checked byte for byte
    // against an independent HKDF-SHA256 implementation.
    #[test]
    fn known_answer_split() {
        let keys = DerivedKeys::derive(&test_secret(), b"TEST").unwrap();

        assert_eq!(
            keys.cipher_key().as_slice(),
            hex::decode("150c3990aa39599d0be1a262911a9c34716239ca1bec4490b4aad14ef27988b9")
                .unwrap()
                .as_slice()
        );
        assert_eq!(
            keys.mac_key().as_slice(),
            hex::decode("04195d948cec5e6097c33aaa6f0df53fb639ec1782846573ffd6384034cc1f92")
                .unwrap()
                .as_slice()
        );
        assert_eq!(
            keys.iv().as_slice(),
            hex::decode("7a25c4704712c29d6a63226911c37e21").unwrap().as_slice()
        );
    }
}
