//! RLE+ wire format constants, error taxonomy and decoding traits.
//!
//! ## Format
//!
//! The buffer is read as one LSB-first bit stream (see [`crate::bits`]):
//!
//! 1. `version` (2 bits), which must equal [`crate::SUPPORTED_VERSION`]
//! 2. `first` (1 bit), the state of position 0
//! 3. Zero or more runs until the stream is exhausted, each one of:
//!    * `1` - a run of length 1
//!    * `0 1` + 4-bit literal - a run of length 0 to 15
//!    * `0 0` + variable-length integer - a run of any length
//!
//! Runs alternate between "set" and "gap", starting with the state given by
//! `first`.

use crate::DEFAULT_VALUE_COUNT_LIMIT;

mod decoder;
mod expander;
mod varint;

pub use decoder::Header;
pub use decoder::RunLengthDecoder;
pub use decoder::RunLengthProgram;
pub use expander::count;
pub use expander::expand;
pub use varint::ReadVarint;

/// Width of the version field in the header.
pub const VERSION_BITS: u32 = 2;

/// Width of the initial state flag in the header.
pub const FIRST_FLAG_BITS: u32 = 1;

/// Width of the payload of a literal run.
pub const LITERAL_RUN_BITS: u32 = 4;

/// Smallest number of bits a variable-length run can occupy: the two tag
/// bits plus one full byte. A run encoding that starts with fewer bits than
/// this left, all of them zero, is byte-alignment padding.
pub const MIN_VARINT_RUN_BITS: u32 = 2 + 8;

/// Trait for types that can be decoded from an RLE+ buffer.
pub trait Decodable: Sized {
    /// Decodes an instance from bytes, validating the entire buffer.
    fn decode(bytes: &[u8]) -> Result<Self, DecodeError>;
}

/// Errors that can occur while decoding an RLE+ buffer.
///
/// Every error is terminal. A buffer that fails to decode should be treated
/// as corrupt; no partial result is ever returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The header carried a version this decoder does not support.
    #[error("unsupported RLE+ version: {0}")]
    InvalidVersion(u8),

    /// A read was requested beyond the end of the bit stream.
    #[error("unexpected end of data: requested {requested} bits, {remaining} remaining")]
    UnexpectedEnd {
        /// Number of bits the read asked for
        requested: u32,
        /// Number of bits left in the stream
        remaining: usize,
    },

    /// A variable-length run needed more than 10 bytes, or its 10th byte
    /// carried a value above 1.
    #[error("variable-length run exceeds {} bits", u64::BITS)]
    RunTooLong,

    /// A variable-length run ended with a zero byte after one or more
    /// continuation bytes.
    #[error("non-minimal variable-length run encoding")]
    InvalidRun,

    /// The running position moved past `u64::MAX`.
    #[error("run lengths overflow the integer range")]
    ArithmeticOverflow,

    /// The expanded set would hold more values than allowed.
    #[error("value count limit exceeded: {0}")]
    TooManyValues(u64),
}

/// Allocation limits applied when expanding a run-length program into a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    /// Maximum number of values in the expanded set, `None` for no cap.
    pub max_values: Option<u64>,
}

impl DecodeLimits {
    /// Limits that never reject a set, however large.
    pub const fn unbounded() -> Self {
        Self { max_values: None }
    }

    /// Limits that cap the expanded set at `max_values` values.
    pub const fn with_max_values(max_values: u64) -> Self {
        Self { max_values: Some(max_values) }
    }

    /// Checks a value count against these limits.
    pub fn check_value_count(&self, count: u64) -> Result<(), DecodeError> {
        match self.max_values {
            Some(max) if count > max => Err(DecodeError::TooManyValues(count)),
            _ => Ok(()),
        }
    }
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self::with_max_values(DEFAULT_VALUE_COUNT_LIMIT)
    }
}
