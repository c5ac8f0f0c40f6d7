//! Thresher Cryptographic Primitives
//!
//! The key-material layer of the Thresher ratchet protocol: asymmetric
//! key pairs for agreement and signing, the authenticated-encryption
//! construction that protects ratchet messages, and the one-time-key
//! records an account publishes so peers can open sessions while it is
//! offline. Serialized state is byte-compatible with the session
//! exports of existing implementations of the protocol.
//!
//! # Key Flow
//!
//! The session layer above this crate turns Diffie-Hellman results into
//! protected messages:
//!
//! ```text
//! Curve25519 shared secret (per-message master secret)
//!        │
//!        ▼
//! HKDF-SHA256 (empty salt, per-domain context string)
//!        │ 80 bytes, split 32/32/16
//!        ▼
//! AES-256 key │ HMAC-SHA256 key │ CBC IV
//!        │
//!        ▼
//! AES-256-CBC + HMAC-SHA256 → protected ratchet message
//! ```
//!
//! Because the IV comes out of the KDF, a (master secret, context) pair
//! must never be reused for two plaintexts; the ratchet supplies a fresh
//! master secret per message.
//!
//! # Design
//!
//! Everything here is a synchronous, stateless function over immutable
//! inputs. The only I/O is reading the system random source during key
//! generation, surfaced as [`CryptoError::RandomSource`]. No component
//! retains mutable state between calls, so values and cipher instances
//! may be shared across threads without coordination.
//!
//! Signature and MAC verification failures are booleans, not errors:
//! an unauthentic message is an expected outcome the caller checks.
//!
//! Secret scalars, seeds, and derived keys are zeroized on drop. Buffers
//! returned to callers (shared secrets, plaintexts) are the caller's to
//! scope and scrub.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod cipher;
pub mod curve25519;
pub mod ed25519;
pub mod error;
pub mod kdf;
pub mod one_time_key;

pub use cipher::AesSha256;
pub use curve25519::Curve25519KeyPair;
pub use ed25519::Ed25519KeyPair;
pub use error::CryptoError;
pub use kdf::DerivedKeys;
pub use one_time_key::OneTimeKey;
