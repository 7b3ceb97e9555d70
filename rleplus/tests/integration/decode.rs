//! End-to-end decoding of crafted RLE+ buffers.

use assert_matches::assert_matches;
use test_case::test_case;

use rleplus::testing::encode_runs;
use rleplus::testing::BitWriter;
use rleplus::BitSet;
use rleplus::Decodable;
use rleplus::DecodeError;
use rleplus::DecodeLimits;
use rleplus::RunLengthProgram;

/// Header `0 0 1`, a literal run of 5, and seven bits of padding.
#[test_log::test]
fn decodes_literal_run_example() {
    let set = rleplus::decode(&[0xB4, 0x00]).unwrap();
    assert_eq!(set.as_slice(), &[0, 1, 2, 3, 4]);
}

#[test]
fn empty_buffer_decodes_to_empty_set() {
    let set = rleplus::decode(&[]).unwrap();
    assert!(set.is_empty());
}

#[test]
fn decoding_is_deterministic() {
    let bytes = encode_runs(false, &[3, 1, 200, 7, 1, 1, 40_000, 12]);
    let first = rleplus::decode(&bytes).unwrap();
    let second = rleplus::decode(&bytes).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 1 + 7 + 1 + 12);
}

#[test]
fn trailing_padding_run_contributes_nothing() {
    let bytes = encode_runs(true, &[2, 3, 4]);
    let program = RunLengthProgram::parse(&bytes).unwrap();

    assert_eq!(&program.runs[..3], &[2, 3, 4]);
    assert!(program.runs[3..].iter().all(|&run| run == 0));
    assert_eq!(
        program.expand(&DecodeLimits::default()).unwrap().as_slice(),
        &[0, 1, 5, 6, 7, 8]
    );
}

#[test]
fn bitset_and_program_implement_decodable() {
    let bytes = encode_runs(false, &[10, 2]);
    let set = BitSet::decode(&bytes).unwrap();
    let program = RunLengthProgram::decode(&bytes).unwrap();

    assert_eq!(set.as_slice(), &[10, 11]);
    assert_eq!(program.count().unwrap(), 2);
}

#[test_case(0b01; "version one")]
#[test_case(0b10; "version two")]
#[test_case(0b11; "version three")]
fn unsupported_version_is_rejected(version: u8) {
    let mut writer = BitWriter::new();
    writer.header(version, true);
    writer.literal_run(5);
    let bytes = writer.finish();

    assert_eq!(
        rleplus::decode(&bytes),
        Err(DecodeError::InvalidVersion(version))
    );
}

/// Writes a header and a `0 0` variable-length tag followed by raw bytes.
fn varint_buffer(bytes: &[u8]) -> Vec<u8> {
    let mut writer = BitWriter::new();
    writer.header(0, true);
    writer.push_bits(0, 2);
    for &byte in bytes {
        writer.push_bits(byte as u64, 8);
    }
    // Mark the end so the padding is not all zero.
    writer.short_run();
    writer.finish()
}

#[test]
fn eleventh_varint_byte_is_rejected() {
    let bytes = varint_buffer(&[0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x01]);
    assert_eq!(rleplus::decode(&bytes), Err(DecodeError::RunTooLong));
}

#[test]
fn tenth_varint_byte_above_one_is_rejected() {
    let bytes = varint_buffer(&[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x02]);
    assert_eq!(rleplus::decode(&bytes), Err(DecodeError::RunTooLong));
}

#[test]
fn non_canonical_zero_is_rejected() {
    let bytes = varint_buffer(&[0x83, 0x00]);
    assert_eq!(rleplus::decode(&bytes), Err(DecodeError::InvalidRun));
}

#[test]
fn ten_byte_run_is_accepted_by_the_parser() {
    let mut writer = BitWriter::new();
    writer.header(0, true);
    writer.varint_run(u64::MAX);
    let bytes = writer.finish();

    let program = RunLengthProgram::parse(&bytes).unwrap();
    assert_eq!(program.runs[0], u64::MAX);

    // Expanding u64::MAX values trips the default allocation limit.
    assert_eq!(
        rleplus::decode(&bytes),
        Err(DecodeError::TooManyValues(u64::MAX))
    );
}

#[test]
fn truncated_after_varint_tag_is_rejected() {
    // One byte: header `0 0 1`, tag `0 0`, then three set bits which cannot
    // hold a continuation byte.
    assert_matches!(
        rleplus::decode(&[0b1110_0100]),
        Err(DecodeError::UnexpectedEnd { requested: 8, remaining: 3 })
    );
}

/// A single byte holding header `0 0 1`, tag `0 0` and zero bits reads
/// both as a varint cut short after its tag and as byte-alignment padding.
/// Zero tails decode as the trailing empty run so that `[0xB4, 0x00]`
/// decodes; only a tail with set bits is a truncation.
#[test]
fn zero_tail_after_varint_tag_is_padding() {
    let program = RunLengthProgram::parse(&[0x04]).unwrap();
    assert!(program.first());
    assert_eq!(program.runs, vec![0]);

    assert_eq!(rleplus::decode(&[0x04]), Ok(BitSet::default()));
}

#[test]
fn truncated_multi_byte_varint_is_rejected() {
    let mut writer = BitWriter::new();
    writer.header(0, false);
    writer.push_bits(0, 2);
    writer.push_bits(0xFF, 8);
    // Three set bits fill out the second byte, too few for another byte.
    writer.push_bits(0b111, 3);
    let bytes = writer.finish();
    assert_eq!(bytes.len(), 2);

    assert_matches!(
        rleplus::decode(&bytes),
        Err(DecodeError::UnexpectedEnd { requested: 8, remaining: 3 })
    );
}

#[test]
fn position_overflow_is_rejected() {
    let bytes = encode_runs(false, &[u64::MAX, 1]);
    assert_eq!(
        rleplus::decode_with_limits(&bytes, &DecodeLimits::unbounded()),
        Err(DecodeError::ArithmeticOverflow)
    );
}

#[test]
fn custom_limits_are_enforced() {
    let bytes = encode_runs(true, &[100]);
    assert_eq!(
        rleplus::decode_with_limits(&bytes, &DecodeLimits::with_max_values(99)),
        Err(DecodeError::TooManyValues(100))
    );
    assert_eq!(
        rleplus::decode_with_limits(&bytes, &DecodeLimits::with_max_values(100))
            .unwrap()
            .len(),
        100
    );
}

#[test]
fn buffers_decode_concurrently() {
    let buffers = (0..8u64)
        .map(|i| encode_runs(i % 2 == 0, &[i + 1, 3, 500 + i]))
        .collect::<Vec<_>>();

    let expected = buffers
        .iter()
        .map(|bytes| rleplus::decode(bytes).unwrap())
        .collect::<Vec<_>>();

    let decoded = std::thread::scope(|scope| {
        let handles = buffers
            .iter()
            .map(|bytes| scope.spawn(move || rleplus::decode(bytes).unwrap()))
            .collect::<Vec<_>>();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect::<Vec<_>>()
    });

    assert_eq!(decoded, expected);
}
