//! Positional reader over a pickled byte stream.

use crate::errors::{PickleError, Result};

/// Reads fixed-width fields from a byte slice in order, tracking the
/// current offset.
///
/// The decoder never scans or skips: each read consumes exactly the
/// requested width starting at the current offset, and a short buffer
/// fails with [`PickleError::Truncated`] before any bytes are taken.
/// [`Decoder::consumed`] reports the running offset so entity decoders
/// can return their exact byte count to callers chaining records.
#[derive(Debug)]
pub struct Decoder<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    /// Create a decoder positioned at the start of `input`.
    #[must_use]
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Read `width` bytes and advance.
    pub fn read(&mut self, width: usize) -> Result<&'a [u8]> {
        let remaining = self.input.len() - self.pos;
        if remaining < width {
            return Err(PickleError::Truncated {
                offset: self.pos,
                needed: width - remaining,
            });
        }
        let field = &self.input[self.pos..self.pos + width];
        self.pos += width;
        Ok(field)
    }

    /// Read a fixed-size array and advance.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut array = [0u8; N];
        array.copy_from_slice(self.read(N)?);
        Ok(array)
    }

    /// Read four big-endian bytes as a `u32` and advance.
    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.read_array::<4>()?))
    }

    /// Read one byte as a boolean and advance.
    ///
    /// Zero is false; any nonzero byte is true, matching the permissive
    /// reading of existing decoders of this format.
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read(1)?[0] != 0)
    }

    /// Bytes consumed so far.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.pos
    }

    /// Bytes still available.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.input.len() - self.pos
    }

    /// The unread tail of the input.
    ///
    /// Used to hand a nested entity decoder its own slice starting at the
    /// current offset.
    #[must_use]
    pub fn rest(&self) -> &'a [u8] {
        &self.input[self.pos..]
    }
}
