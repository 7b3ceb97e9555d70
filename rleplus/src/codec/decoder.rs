//! Run-length program decoding.
//!
//! This module parses the RLE+ header and the sequence of run lengths that
//! follows it. The decoder implements several robustness checks:
//!
//! - **Version validation**: unknown versions are rejected up front, as a
//!   future version may change the meaning of the run tags
//! - **Bounded reads**: every read is checked against the end of the stream,
//!   truncated input is never zero-filled
//! - **Canonical lengths**: oversized and non-minimal variable-length runs
//!   are rejected
//!
//! ## Trailing Padding
//!
//! Encoders pad the final byte with zero bits. Since decoding runs until the
//! stream is exhausted, that padding is itself decoded as one trailing run of
//! length zero, which contributes nothing to the decoded set. When fewer than
//! [`MIN_VARINT_RUN_BITS`] bits remain and all of them are zero, they would
//! start a variable-length run that cannot complete; they are decoded as that
//! same zero-length run instead of an `UnexpectedEnd` error.

use crate::bits::BitCursor;
use crate::bitset::BitSet;
use crate::SUPPORTED_VERSION;

use super::expander;
use super::Decodable;
use super::DecodeError;
use super::DecodeLimits;
use super::ReadVarint;
use super::FIRST_FLAG_BITS;
use super::LITERAL_RUN_BITS;
use super::MIN_VARINT_RUN_BITS;
use super::VERSION_BITS;

/// The fixed-width fields at the start of every RLE+ buffer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Header {
    /// Format version.
    pub version: u8,
    /// Whether position 0 belongs to the set. Runs alternate from here.
    pub first: bool,
}

impl Header {
    /// Reads and validates the header.
    fn read(cursor: &mut BitCursor) -> Result<Self, DecodeError> {
        // A two bit read always fits in a u8.
        let version = cursor.next_bits(VERSION_BITS)? as u8;
        if version != SUPPORTED_VERSION {
            return Err(DecodeError::InvalidVersion(version));
        }

        let first = cursor.next_bits(FIRST_FLAG_BITS)? == 1;

        Ok(Self { version, first })
    }
}

/// Streaming decoder that yields run lengths one at a time.
///
/// The header is read and validated on construction. Iteration yields each
/// run length in order, and stops after the bit stream is exhausted or after
/// the first error.
///
/// ```
/// use rleplus::RunLengthDecoder;
///
/// let decoder = RunLengthDecoder::new(&[0xB4, 0x00]).unwrap();
/// assert!(decoder.header().first);
///
/// let runs = decoder.collect::<Result<Vec<_>, _>>().unwrap();
/// assert_eq!(runs, vec![5, 0]);
/// ```
#[derive(Debug, Clone)]
pub struct RunLengthDecoder<'a> {
    cursor: BitCursor<'a>,
    header: Header,
    fused: bool,
}

impl<'a> RunLengthDecoder<'a> {
    /// Creates a decoder over `bytes`, reading the header.
    ///
    /// An empty buffer has no header; it yields the default header and no
    /// runs, and so decodes to an empty set.
    pub fn new(bytes: &'a [u8]) -> Result<Self, DecodeError> {
        let mut cursor = BitCursor::new(bytes);

        let header = if bytes.is_empty() {
            Header::default()
        } else {
            Header::read(&mut cursor)?
        };

        Ok(Self { cursor, header, fused: false })
    }

    /// Returns the decoded header.
    pub fn header(&self) -> Header {
        self.header
    }

    /// Returns the number of bits consumed so far.
    pub fn bit_position(&self) -> usize {
        self.cursor.position()
    }

    /// Reads a single run from the stream.
    fn read_run(&mut self) -> Result<u64, DecodeError> {
        let cursor = &mut self.cursor;

        // `1`: a single element run.
        if cursor.next_bit()? {
            return Ok(1);
        }

        // `0 1`: a 4-bit literal run.
        if cursor.next_bit()? {
            return cursor.next_bits(LITERAL_RUN_BITS);
        }

        // `0 0`: a variable-length run.
        cursor.read_varint()
    }

    /// Returns `true` if the rest of the stream is zero padding too short to
    /// hold another run.
    fn at_padding(&self) -> bool {
        self.cursor.remaining() < MIN_VARINT_RUN_BITS as usize && self.cursor.rest_is_zero()
    }
}

impl Iterator for RunLengthDecoder<'_> {
    type Item = Result<u64, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.fused || self.cursor.is_exhausted() {
            return None;
        }

        if self.at_padding() {
            tracing::trace!(bits = self.cursor.remaining(), "decoded trailing padding run");
            self.fused = true;
            return Some(Ok(0));
        }

        let start = self.cursor.position();
        match self.read_run() {
            Ok(run) => {
                tracing::trace!(run, bit_position = start, "decoded run");
                Some(Ok(run))
            }
            Err(error) => {
                tracing::debug!(%error, bit_position = start, "rejecting malformed run");
                self.fused = true;
                Some(Err(error))
            }
        }
    }
}

impl std::iter::FusedIterator for RunLengthDecoder<'_> {}

/// A fully parsed and validated RLE+ buffer: the header plus every run
/// length, in order.
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RunLengthProgram {
    /// The buffer header.
    pub header: Header,
    /// Run lengths, alternating between set and gap starting with
    /// `header.first`.
    pub runs: Vec<u64>,
}

impl RunLengthProgram {
    /// Parses an entire buffer. Fails on the first malformed run; no partial
    /// program is returned.
    #[tracing::instrument(skip_all, fields(len = bytes.len()))]
    pub fn parse(bytes: &[u8]) -> Result<Self, DecodeError> {
        let decoder = RunLengthDecoder::new(bytes).inspect_err(|error| {
            tracing::debug!(%error, "rejecting malformed header");
        })?;
        let header = decoder.header();
        let runs = decoder.collect::<Result<Vec<_>, _>>()?;

        Ok(Self { header, runs })
    }

    /// Returns the format version.
    pub fn version(&self) -> u8 {
        self.header.version
    }

    /// Returns whether position 0 is set.
    pub fn first(&self) -> bool {
        self.header.first
    }

    /// Returns the number of values the program expands to, without
    /// allocating them.
    pub fn count(&self) -> Result<u64, DecodeError> {
        expander::count(self.header.first, &self.runs)
    }

    /// Expands the program into its set of values.
    pub fn expand(&self, limits: &DecodeLimits) -> Result<BitSet, DecodeError> {
        expander::expand(self.header.first, &self.runs, limits)
    }
}

impl Decodable for RunLengthProgram {
    fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        Self::parse(bytes)
    }
}
