//! Authenticated encryption for ratchet messages.
//!
//! The construction is AES-256-CBC with PKCS#7 padding for
//! confidentiality and HMAC-SHA256 for authenticity, with all key
//! material (including the IV) derived from a caller-supplied master
//! secret via [`DerivedKeys`]. The cipher itself is stateless: every
//! call derives fresh key material and nothing is retained between
//! calls, so one instance may be shared freely across threads.

use aes::Aes256;
use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::CryptoError;
use crate::kdf::DerivedKeys;

type Aes256CbcEncryptor = cbc::Encryptor<Aes256>;
type Aes256CbcDecryptor = cbc::Decryptor<Aes256>;
type HmacSha256 = Hmac<Sha256>;

/// AES block size; ciphertext lengths are always a multiple of this.
pub const CIPHER_BLOCK_LENGTH: usize = 16;

/// Native length of the HMAC-SHA256 tag.
pub const MAC_LENGTH: usize = 32;

/// Stateless authenticated cipher bound to one key-derivation context.
///
/// The context string is fixed at construction and mixed into every
/// derivation this instance performs, separating its key material from
/// every other usage domain of the same master secrets.
///
/// # Security
///
/// The IV is derived deterministically from the master secret, not drawn
/// per message. Encrypting two different plaintexts under the same
/// (master secret, context) pair reuses the (key, IV) pair and breaks
/// confidentiality. The ratchet layer guarantees a fresh master secret
/// per message; any other caller must uphold the same rule.
pub struct AesSha256 {
    kdf_info: Vec<u8>,
}

impl AesSha256 {
    /// Create a cipher whose derivations all use `kdf_info` as the
    /// domain-separation context.
    pub fn new(kdf_info: impl Into<Vec<u8>>) -> Self {
        Self { kdf_info: kdf_info.into() }
    }

    /// Encrypt `plaintext` under keys derived from `master_secret`.
    ///
    /// The plaintext is padded to the cipher block size, so the returned
    /// ciphertext is always a nonzero multiple of
    /// [`CIPHER_BLOCK_LENGTH`].
    ///
    /// # Errors
    ///
    /// - `KeyDerivation`: the KDF stream came up short
    /// - `Encryption`: the derived key or IV had the wrong length
    pub fn encrypt(&self, master_secret: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let keys = DerivedKeys::derive(master_secret, &self.kdf_info)?;
        let encryptor = Aes256CbcEncryptor::new_from_slices(keys.cipher_key(), keys.iv())
            .map_err(|_| CryptoError::Encryption { reason: "invalid key or iv length" })?;
        Ok(encryptor.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
    }

    /// Decrypt `ciphertext` under keys derived from `master_secret`.
    ///
    /// # Errors
    ///
    /// - `KeyDerivation`: the KDF stream came up short
    /// - `Decryption`: the ciphertext is empty, not a multiple of the
    ///   block size, or its padding is invalid
    pub fn decrypt(&self, master_secret: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if ciphertext.is_empty() || ciphertext.len() % CIPHER_BLOCK_LENGTH != 0 {
            return Err(CryptoError::Decryption {
                reason: "ciphertext length is not a multiple of the cipher block size",
            });
        }

        let keys = DerivedKeys::derive(master_secret, &self.kdf_info)?;
        let decryptor = Aes256CbcDecryptor::new_from_slices(keys.cipher_key(), keys.iv())
            .map_err(|_| CryptoError::Decryption { reason: "invalid key or iv length" })?;
        decryptor
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| CryptoError::Decryption { reason: "invalid padding" })
    }

    /// Compute the full-length HMAC-SHA256 tag for `message` under the
    /// MAC key derived from `master_secret`.
    ///
    /// # Errors
    ///
    /// - `KeyDerivation`: the KDF stream came up short
    pub fn mac(&self, master_secret: &[u8], message: &[u8]) -> Result<[u8; MAC_LENGTH], CryptoError> {
        let keys = DerivedKeys::derive(master_secret, &self.kdf_info)?;

        let Ok(mut mac) = HmacSha256::new_from_slice(keys.mac_key()) else {
            unreachable!("HMAC-SHA256 accepts any key size");
        };
        mac.update(message);
        let result = mac.finalize().into_bytes();

        let mut tag = [0u8; MAC_LENGTH];
        tag.copy_from_slice(&result);
        Ok(tag)
    }

    /// Check `given_tag` against the recomputed tag for `message`.
    ///
    /// Only the first `given_tag.len()` bytes are compared, so callers
    /// may pass the truncated tags carried on the wire. The comparison
    /// is constant time in the tag content. Tags longer than the native
    /// length never verify; a zero-length tag verifies trivially, and
    /// minimum tag lengths are enforced at the protocol layer.
    ///
    /// # Errors
    ///
    /// - `KeyDerivation`: the KDF stream came up short
    pub fn verify_mac(
        &self,
        master_secret: &[u8],
        message: &[u8],
        given_tag: &[u8],
    ) -> Result<bool, CryptoError> {
        let tag = self.mac(master_secret, message)?;
        if given_tag.len() > tag.len() {
            return Ok(false);
        }
        Ok(given_tag.ct_eq(&tag[..given_tag.len()]).into())
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
    fn encrypt_decrypt_roundtrip() {
        let cipher = AesSha256::new(b"RATCHET".as_slice());
        let secret = test_secret();

        let ciphertext = cipher.encrypt(&secret, b"Hello, World").unwrap();
        let plaintext = cipher.decrypt(&secret, &ciphertext).unwrap();

        assert_eq!(plaintext, b"Hello, World");
    }

    #[test]
    fn empty_plaintext_still_emits_one_block() {
        let cipher = AesSha256::new(b"RATCHET".as_slice());
        let ciphertext = cipher.encrypt(&test_secret(), b"").unwrap();

        assert_eq!(ciphertext.len(), CIPHER_BLOCK_LENGTH);
        assert_eq!(cipher.decrypt(&test_secret(), &ciphertext).unwrap(), b"");
    }

    #[test]
    fn block_aligned_plaintext_gains_a_padding_block() {
        let cipher = AesSha256::new(b"RATCHET".as_slice());
        let plaintext = [0x42u8; CIPHER_BLOCK_LENGTH];

        let ciphertext = cipher.encrypt(&test_secret(), &plaintext).unwrap();
        assert_eq!(ciphertext.len(), 2 * CIPHER_BLOCK_LENGTH);
    }

    #[test]
    fn wrong_secret_fails_padding_check() {
        let cipher = AesSha256::new(b"RATCHET".as_slice());
        let ciphertext = cipher.encrypt(&test_secret(), b"secret message").unwrap();

        let result = cipher.decrypt(&[0xFF; 32], &ciphertext);
        assert!(matches!(result, Err(CryptoError::Decryption { .. })));
    }

    #[test]
    fn unaligned_ciphertext_is_rejected() {
        let cipher = AesSha256::new(b"RATCHET".as_slice());
        let result = cipher.decrypt(&test_secret(), &[0u8; 17]);

        assert!(matches!(
            result,
            Err(CryptoError::Decryption {
                reason: "ciphertext length is not a multiple of the cipher block size"
            })
        ));
    }

    #[test]
    fn empty_ciphertext_is_rejected() {
        let cipher = AesSha256::new(b"RATCHET".as_slice());
        assert!(cipher.decrypt(&test_secret(), &[]).is_err());
    }

    #[test]
    fn mac_verifies_at_full_length() {
        let cipher = AesSha256::new(b"RATCHET".as_slice());
        let secret = test_secret();

        let tag = cipher.mac(&secret, b"message").unwrap();
        assert!(cipher.verify_mac(&secret, b"message", &tag).unwrap());
    }

    #[test]
    fn truncated_tag_verifies() {
        let cipher = AesSha256::new(b"RATCHET".as_slice());
        let secret = test_secret();

        let tag = cipher.mac(&secret, b"message").unwrap();
        // The wire format carries 8-byte tags.
        assert!(cipher.verify_mac(&secret, b"message", &tag[..8]).unwrap());
    }

    #[test]
    fn flipped_bit_in_prefix_fails() {
        let cipher = AesSha256::new(b"RATCHET".as_slice());
        let secret = test_secret();

        let tag = cipher.mac(&secret, b"message").unwrap();
        let mut prefix = tag[..8].to_vec();
        prefix[3] ^= 0x01;
        assert!(!cipher.verify_mac(&secret, b"message", &prefix).unwrap());
    }

    #[test]
    fn different_message_fails() {
        let cipher = AesSha256::new(b"RATCHET".as_slice());
        let secret = test_secret();

        let tag = cipher.mac(&secret, b"message").unwrap();
        assert!(!cipher.verify_mac(&secret, b"other message", &tag).unwrap());
    }

    #[test]
    fn overlong_tag_never_verifies() {
        let cipher = AesSha256::new(b"RATCHET".as_slice());
        let secret = test_secret();

        let tag = cipher.mac(&secret, b"message").unwrap();
        let mut overlong = tag.to_vec();
        overlong.push(0);
        assert!(!cipher.verify_mac(&secret, b"message", &overlong).unwrap());
    }

    #[test]
    fn empty_tag_verifies_trivially() {
        let cipher = AesSha256::new(b"RATCHET".as_slice());
        assert!(cipher.verify_mac(&test_secret(), b"message", &[]).unwrap());
    }

    // Ciphertext and tag for "Hello, World" under the keys of the
    // kdf::tests::known_answer_split vector, checked against independent
    // AES-CBC and HMAC implementations.
    #[test]
    fn known_answer_encrypt_and_mac() {
        let cipher = AesSha256::new(b"TEST".as_slice());
        let secret = test_secret();

        let ciphertext = cipher.encrypt(&secret, b"Hello, World").unwrap();
        assert_eq!(
            ciphertext,
            hex::decode("e9ab9d204e7cc3284e5a2b8e41d2193d").unwrap()
        );

        let tag = cipher.mac(&secret, b"Hello, World").unwrap();
        assert_eq!(
            tag.as_slice(),
            hex::decode("1ae8f67c69676f7c7071203d502b611cb4959e982d60d51ebbd3f97c06b5f8b8")
                .unwrap()
                .as_slice()
        );
    }
}
