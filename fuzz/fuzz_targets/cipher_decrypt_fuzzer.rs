//! Fuzz target for authenticated-cipher decryption
//!
//! Decrypts arbitrary ciphertext under arbitrary master secrets and
//! contexts. Invalid lengths and padding must surface as errors, never
//! as panics.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use thresher_crypto::AesSha256;

#[derive(Arbitrary, Debug)]
struct DecryptInput {
    master_secret: Vec<u8>,
    kdf_info: Vec<u8>,
    ciphertext: Vec<u8>,
}

fuzz_target!(|input: DecryptInput| {
    let cipher = AesSha256::new(input.kdf_info);
    let _ = cipher.decrypt(&input.master_secret, &input.ciphertext);
});
