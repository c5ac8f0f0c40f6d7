//! Property-based tests for the pickle encoder/decoder primitives.
//!
//! Verifies that every primitive write is read back exactly, that offsets
//! are stable, and that truncation is detected at the right position.

use proptest::prelude::*;
use thresher_pickle::{Decoder, Encoder, PickleError};

proptest! {
    #[test]
    fn raw_bytes_round_trip(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let mut encoder = Encoder::new();
        encoder.write(&bytes);

        let encoded = encoder.into_bytes();
        let mut decoder = Decoder::new(&encoded);
        prop_assert_eq!(decoder.read(bytes.len()).unwrap(), bytes.as_slice());
        prop_assert_eq!(decoder.consumed(), bytes.len());
        prop_assert_eq!(decoder.remaining(), 0);
    }

    #[test]
    fn u32_round_trip(value in any::<u32>()) {
        let mut encoder = Encoder::new();
        encoder.write_u32(value);
        prop_assert_eq!(encoder.len(), 4);

        let encoded = encoder.into_bytes();
        let mut decoder = Decoder::new(&encoded);
        prop_assert_eq!(decoder.read_u32().unwrap(), value);
    }

    #[test]
    fn bool_round_trip(value in any::<bool>()) {
        let mut encoder = Encoder::new();
        encoder.write_bool(value);
        prop_assert_eq!(encoder.len(), 1);

        let encoded = encoder.into_bytes();
        let mut decoder = Decoder::new(&encoded);
        prop_assert_eq!(decoder.read_bool().unwrap(), value);
    }

    #[test]
    fn mixed_fields_keep_their_offsets(
        id in any::<u32>(),
        flag in any::<bool>(),
        block in prop::collection::vec(any::<u8>(), 32),
    ) {
        let mut encoder = Encoder::new();
        encoder.write_u32(id);
        encoder.write_bool(flag);
        encoder.write(&block);
        encoder.write_zeroes(32);
        prop_assert_eq!(encoder.len(), 4 + 1 + 32 + 32);

        let encoded = encoder.into_bytes();
        let mut decoder = Decoder::new(&encoded);
        prop_assert_eq!(decoder.read_u32().unwrap(), id);
        prop_assert_eq!(decoder.read_bool().unwrap(), flag);
        prop_assert_eq!(decoder.read(32).unwrap(), block.as_slice());
        prop_assert_eq!(decoder.read(32).unwrap(), &[0u8; 32]);
        prop_assert_eq!(decoder.consumed(), encoded.len());
    }

    #[test]
    fn truncation_is_reported_at_the_cut(
        block in prop::collection::vec(any::<u8>(), 8..64),
        cut in 0usize..8,
    ) {
        let mut encoder = Encoder::new();
        encoder.write(&block);
        let encoded = encoder.into_bytes();

        let short = &encoded[..cut];
        let mut decoder = Decoder::new(short);
        let err = decoder.read(block.len()).unwrap_err();
        prop_assert_eq!(
            err,
            PickleError::Truncated { offset: 0, needed: block.len() - cut }
        );
    }

    #[test]
    fn zero_fill_width_is_independent_of_content(width in 0usize..128) {
        let mut encoder = Encoder::new();
        encoder.write_zeroes(width);
        let encoded = encoder.into_bytes();
        prop_assert_eq!(encoded.len(), width);
        prop_assert!(encoded.iter().all(|&b| b == 0));
    }
}
