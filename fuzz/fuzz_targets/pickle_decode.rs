//! Fuzz target for entity unpickling
//!
//! Feeds arbitrary byte sequences to every entity decoder to find:
//! - Parser crashes or panics
//! - Offset miscalculations and buffer over-reads
//! - Key-material validation bypasses
//!
//! The fuzzer should NEVER panic. All invalid inputs should return an
//! error, and every successful decode must report a consumed count
//! within the input length.

#![no_main]

use libfuzzer_sys::fuzz_target;
use thresher_crypto::{Curve25519KeyPair, Ed25519KeyPair, OneTimeKey};
use thresher_pickle::Unpickle;

fuzz_target!(|data: &[u8]| {
    if let Ok((_, read)) = Curve25519KeyPair::unpickle(data) {
        assert!(read <= data.len());
    }
    if let Ok((_, read)) = Ed25519KeyPair::unpickle(data) {
        assert!(read <= data.len());
    }
    if let Ok((_, read)) = OneTimeKey::unpickle(data) {
        assert!(read <= data.len());
    }
});
