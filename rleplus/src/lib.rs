#![deny(missing_docs)]

//! # RLE+ Integer Set Decoding
//!
//! This library decodes the RLE+ bitfield format: a compact, run-length
//! encoded representation of a sparse set of non-negative integers (sector
//! numbers, block indices and the like) packed into an LSB-first bit stream.
//!
//! ## Usage Example
//!
//! ```
//! // version 0, first run is "set", one literal run of length 5, then
//! // byte-alignment padding.
//! let set = rleplus::decode(&[0xB4, 0x00]).unwrap();
//! assert_eq!(set.as_slice(), &[0, 1, 2, 3, 4]);
//! ```
//!
//! ## Architecture
//!
//! * **Bits**: [`BitCursor`] reads the buffer as one contiguous bit stream
//! * **Codec**: [`RunLengthDecoder`] validates the header and yields run
//!   lengths; [`RunLengthProgram`] holds the complete parse
//! * **Expander**: [`expand`] turns a program into a [`BitSet`]
//!
//! Decoding is synchronous and holds no shared state, so independent
//! buffers may be decoded from any number of threads at once.

pub mod bits;
pub mod bitset;
pub mod codec;
pub mod config;
pub mod error;
pub mod logging;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use bits::BitCursor;
pub use bitset::BitSet;
pub use codec::expand;
pub use codec::Decodable;
pub use codec::DecodeError;
pub use codec::DecodeLimits;
pub use codec::Header;
pub use codec::RunLengthDecoder;
pub use codec::RunLengthProgram;

/// The only RLE+ format version this decoder understands.
pub const SUPPORTED_VERSION: u8 = 0;

/// Default cap on the number of values a single decode may produce. Each
/// value is a `u64`, so this bounds the result allocation at 128 MiB even
/// though a single variable-length run can describe up to `u64::MAX`
/// positions.
pub const DEFAULT_VALUE_COUNT_LIMIT: u64 = 1 << 24;

/// Decodes an RLE+ buffer into the ascending set of integers it encodes,
/// applying [`DecodeLimits::default`].
///
/// An empty buffer decodes to an empty set.
#[tracing::instrument(skip_all, fields(len = bytes.len()))]
pub fn decode(bytes: &[u8]) -> Result<BitSet, DecodeError> {
    decode_with_limits(bytes, &DecodeLimits::default())
}

/// Decodes an RLE+ buffer, enforcing the provided allocation limits on the
/// expanded set.
pub fn decode_with_limits(bytes: &[u8], limits: &DecodeLimits) -> Result<BitSet, DecodeError> {
    RunLengthProgram::parse(bytes)?.expand(limits)
}
