//! Fuzz target for truncated-MAC verification
//!
//! Verifies arbitrary tags of arbitrary lengths against arbitrary
//! messages. The verifier must return a boolean for every input and
//! must accept a recomputed tag prefix of any length.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use thresher_crypto::AesSha256;

#[derive(Arbitrary, Debug)]
struct VerifyInput {
    master_secret: Vec<u8>,
    kdf_info: Vec<u8>,
    message: Vec<u8>,
    given_tag: Vec<u8>,
    prefix_len: u8,
}

fuzz_target!(|input: VerifyInput| {
    let cipher = AesSha256::new(input.kdf_info.clone());

    // Arbitrary tags must never panic.
    let _ = cipher.verify_mac(&input.master_secret, &input.message, &input.given_tag);

    // A genuine tag prefix must always verify.
    if let Ok(tag) = cipher.mac(&input.master_secret, &input.message) {
        let prefix_len = usize::from(input.prefix_len) % (tag.len() + 1);
        let verified = cipher
            .verify_mac(&input.master_secret, &input.message, &tag[..prefix_len])
            .unwrap_or(false);
        assert!(verified);
    }
});
