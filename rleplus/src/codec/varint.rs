//! # Variable-Length Run Encoding
//!
//! Long runs are stored as a base-128 variable-length integer, the same
//! layout as unsigned LEB128, except that the bytes are pulled from the bit
//! stream rather than from byte-aligned storage.
//!
//! ## Encoding Format
//!
//! Each byte uses:
//! - Lower 7 bits for value data, least significant group first
//! - High bit (0x80) as continuation flag
//!
//! For example, decimal 300 encodes as: [0xAC, 0x02]
//! - 0xAC = 10101100: High bit set (more bytes follow) + bits 0-6 of value
//! - 0x02 = 00000010: High bit clear (final byte) + bits 7-13 of value
//!
//! Encodings must be minimal: a final byte of zero after continuation bytes
//! is rejected.

use crate::bits::BitCursor;

use super::DecodeError;

/// Maximum number of bytes a run length may occupy. Nine bytes cover 63
/// bits and the 10th byte provides the final bit of a u64.
const MAX_BYTES: usize = 10;

/// Number of value bits stored in each byte.
const BITS_PER_BYTE: usize = 7;

/// Bit mask to extract the lower 7 bits (value data) from a byte.
const LOWER_BITS_MASK: u8 = 0x7F;

/// Flag bit indicating that more bytes follow.
const CONTINUATION_FLAG: u8 = 0x80;

/// Largest value the 10th byte may hold, continuation flag included.
const MAX_FINAL_BYTE: u8 = 0x01;

/// Trait for reading variable-length run lengths from a bit source.
pub trait ReadVarint {
    /// Reads one variable-length integer.
    ///
    /// ## Errors
    /// * `RunTooLong` - the 10th byte is present and greater than 1
    /// * `InvalidRun` - the encoding ends in a redundant zero byte
    /// * `UnexpectedEnd` - the stream ends before the final byte
    fn read_varint(&mut self) -> Result<u64, DecodeError>;
}

impl ReadVarint for BitCursor<'_> {
    fn read_varint(&mut self) -> Result<u64, DecodeError> {
        let mut result: u64 = 0;

        for index in 0..MAX_BYTES {
            // An 8 bit read always fits in a u8.
            let byte = self.next_bits(8)? as u8;
            let value = (byte & LOWER_BITS_MASK) as u64;

            // A 10th byte may only contribute bit 63, and cannot continue.
            if index == MAX_BYTES - 1 && byte > MAX_FINAL_BYTE {
                return Err(DecodeError::RunTooLong);
            }

            // Shifts top out at 63 bits, and the check above keeps the 10th
            // byte's value within a single bit.
            result |= value << (BITS_PER_BYTE * index);

            if byte & CONTINUATION_FLAG == 0 {
                if value == 0 && index > 0 {
                    return Err(DecodeError::InvalidRun);
                }
                return Ok(result);
            }
        }

        // The 10th byte can never carry a continuation flag.
        Err(DecodeError::RunTooLong)
    }
}
