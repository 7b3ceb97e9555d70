//! Bit-level reading over a borrowed byte buffer.
//!
//! RLE+ payloads are not byte aligned: a run may start at any bit. The
//! [`BitCursor`] treats the buffer as one contiguous little-endian bit
//! stream. Byte 0 is consumed before byte 1, and within each byte the least
//! significant bit comes first.
//!
//! Reads never zero-extend past the end of the buffer. Asking for more bits
//! than remain is an [`DecodeError::UnexpectedEnd`] error and leaves the
//! cursor where it was.

use crate::codec::DecodeError;

/// Number of bits in a byte.
const BITS_PER_BYTE: u32 = 8;

/// Largest bit count a single [`BitCursor::next_bits`] call supports. The
/// decoder never asks for more than 8 bits at a time.
pub const MAX_READ_BITS: u32 = u64::BITS;

/// A forward-only cursor over the bits of a byte slice.
///
/// The cursor keeps an explicit byte index and bit offset into the current
/// byte, so reading allocates nothing regardless of buffer size.
#[derive(Debug, Clone)]
pub struct BitCursor<'a> {
    bytes: &'a [u8],
    /// Index of the byte holding the next unread bit.
    byte_index: usize,
    /// Offset (0..8) of the next unread bit within `bytes[byte_index]`.
    bit_offset: u32,
}

impl<'a> BitCursor<'a> {
    /// Creates a cursor positioned at the first bit of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, byte_index: 0, bit_offset: 0 }
    }

    /// Returns the number of bits consumed so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.byte_index
            .saturating_mul(BITS_PER_BYTE as usize)
            .saturating_add(self.bit_offset as usize)
    }

    /// Returns the number of bits that can still be read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.bytes
            .len()
            .saturating_mul(BITS_PER_BYTE as usize)
            .saturating_sub(self.position())
    }

    /// Returns `true` if every bit has been consumed.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns `true` if every unread bit is zero. An exhausted cursor
    /// trivially satisfies this.
    pub fn rest_is_zero(&self) -> bool {
        let Some((current, rest)) = self.bytes.get(self.byte_index..).and_then(<[u8]>::split_first)
        else {
            return true;
        };

        current >> self.bit_offset == 0 && rest.iter().all(|&byte| byte == 0)
    }

    /// Reads the next `n` bits as an unsigned integer and advances the cursor
    /// by `n`.
    ///
    /// The first bit read becomes bit 0 of the result, the second bit 1, and
    /// so on. Reading zero bits always succeeds and returns 0.
    ///
    /// ## Errors
    /// * `UnexpectedEnd` - fewer than `n` bits remain. The cursor does not
    ///   move in this case.
    pub fn next_bits(&mut self, n: u32) -> Result<u64, DecodeError> {
        debug_assert!(n <= MAX_READ_BITS, "cannot read {n} bits into a u64");

        let remaining = self.remaining();
        if n as usize > remaining {
            return Err(DecodeError::UnexpectedEnd { requested: n, remaining });
        }

        let mut value: u64 = 0;
        let mut filled = 0;

        while filled < n {
            let byte = self
                .bytes
                .get(self.byte_index)
                .copied()
                .ok_or(DecodeError::UnexpectedEnd { requested: n, remaining })?;

            // Take as many bits as the current byte still holds, up to what
            // the caller asked for.
            let take = (BITS_PER_BYTE - self.bit_offset).min(n - filled);
            let mask = (1u16 << take) - 1;
            let chunk = (byte >> self.bit_offset) as u16 & mask;

            value |= (chunk as u64) << filled;
            filled += take;
            self.bit_offset += take;

            if self.bit_offset == BITS_PER_BYTE {
                self.bit_offset = 0;
                self.byte_index += 1;
            }
        }

        Ok(value)
    }

    /// Reads a single bit.
    #[inline]
    pub fn next_bit(&mut self) -> Result<bool, DecodeError> {
        Ok(self.next_bits(1)? == 1)
    }
}
