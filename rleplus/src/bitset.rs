//! The decoded set of integer positions.

use std::ops::RangeInclusive;

use crate::codec::Decodable;
use crate::codec::DecodeError;

/// An ascending, duplicate-free set of non-negative integers, as produced
/// by decoding an RLE+ buffer.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct BitSet(Vec<u64>);

impl BitSet {
    /// Wraps values that the caller guarantees are strictly increasing.
    pub(crate) fn from_sorted_unchecked(values: Vec<u64>) -> Self {
        debug_assert!(values.windows(2).all(|pair| pair[0] < pair[1]));
        Self(values)
    }

    /// Returns the number of values in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the set holds no values.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if `value` is in the set.
    pub fn contains(&self, value: u64) -> bool {
        self.0.binary_search(&value).is_ok()
    }

    /// Returns the smallest value, if any.
    pub fn first(&self) -> Option<u64> {
        self.0.first().copied()
    }

    /// Returns the largest value, if any.
    pub fn last(&self) -> Option<u64> {
        self.0.last().copied()
    }

    /// Iterates over the values in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.0.iter().copied()
    }

    /// Returns the values as an ascending slice.
    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    /// Consumes the set, returning the ascending values.
    pub fn into_vec(self) -> Vec<u64> {
        self.0
    }

    /// Iterates over maximal runs of consecutive values as inclusive ranges.
    ///
    /// ```
    /// let set = rleplus::decode(&[0b1111_1100]).unwrap();
    /// assert_eq!(set.ranges().collect::<Vec<_>>(), vec![0..=0, 2..=2, 4..=4]);
    /// ```
    pub fn ranges(&self) -> Ranges<'_> {
        Ranges { values: &self.0 }
    }
}

impl Decodable for BitSet {
    fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        crate::decode(bytes)
    }
}

impl IntoIterator for BitSet {
    type Item = u64;
    type IntoIter = std::vec::IntoIter<u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a BitSet {
    type Item = u64;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, u64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}

impl From<BitSet> for Vec<u64> {
    fn from(set: BitSet) -> Self {
        set.0
    }
}

/// Iterator over the maximal consecutive ranges of a [`BitSet`].
#[derive(Debug, Clone)]
pub struct Ranges<'a> {
    values: &'a [u64],
}

impl Iterator for Ranges<'_> {
    type Item = RangeInclusive<u64>;

    fn next(&mut self) -> Option<Self::Item> {
        let (&start, rest) = self.values.split_first()?;

        // Values are strictly increasing, so a run of consecutive values
        // ends at the first index where the gap to `start` exceeds the index.
        let len = rest
            .iter()
            .enumerate()
            .take_while(|&(index, &value)| value - start == index as u64 + 1)
            .count();

        self.values = &rest[len..];
        Some(start..=start + len as u64)
    }
}
