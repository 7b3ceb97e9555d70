//! Property tests comparing the decoder against sets built directly.

use std::collections::BTreeSet;

use proptest::prelude::*;

use rleplus::testing::encode_runs;
use rleplus::testing::encode_set;
use rleplus::DecodeLimits;
use rleplus::RunLengthProgram;

/// Maximum value for generated positions to keep expansion cheap.
const MAX_POSITION: u64 = 100_000;

fn to_sorted_unique(values: &[u64]) -> Vec<u64> {
    values.iter().copied().collect::<BTreeSet<_>>().into_iter().collect()
}

proptest! {
    #[test]
    fn test_decodes_encoded_sets(values in prop::collection::vec(0..MAX_POSITION, 0..500)) {
        let expected = to_sorted_unique(&values);
        let decoded = rleplus::decode(&encode_set(&expected)).unwrap();

        prop_assert_eq!(decoded.as_slice(), expected.as_slice());
    }

    #[test]
    fn test_dense_runs(
        first in any::<bool>(),
        runs in prop::collection::vec(1..40u64, 0..64),
    ) {
        let bytes = encode_runs(first, &runs);
        let program = RunLengthProgram::parse(&bytes).unwrap();
        let set = program.expand(&DecodeLimits::default()).unwrap();

        // Every encoded run survives, possibly followed by one padding run.
        prop_assert_eq!(&program.runs[..runs.len()], runs.as_slice());
        prop_assert!(program.runs.len() <= runs.len() + 1);
        prop_assert!(program.runs[runs.len()..].iter().all(|&run| run == 0));

        prop_assert_eq!(program.count().unwrap(), set.len() as u64);
    }

    /// Arbitrary bytes either fail cleanly or decode to a strictly
    /// increasing set, and decoding twice gives the same answer.
    #[test]
    fn test_arbitrary_bytes(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let limits = DecodeLimits::with_max_values(MAX_POSITION);
        let first = rleplus::decode_with_limits(&bytes, &limits);
        let second = rleplus::decode_with_limits(&bytes, &limits);
        prop_assert_eq!(&first, &second);

        if let Ok(set) = first {
            prop_assert!(set.as_slice().windows(2).all(|pair| pair[0] < pair[1]));
        }
    }

    #[test]
    fn test_ranges_cover_the_set(values in prop::collection::vec(0..1000u64, 0..200)) {
        let expected = to_sorted_unique(&values);
        let set = rleplus::decode(&encode_set(&expected)).unwrap();

        let flattened = set
            .ranges()
            .flat_map(|range| range.collect::<Vec<_>>())
            .collect::<Vec<_>>();
        prop_assert_eq!(flattened, expected);
    }
}
