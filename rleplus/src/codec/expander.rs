//! Expansion of run lengths into the set of positions they cover.
//!
//! Runs alternate between "set" and "gap" starting with the `first` flag. A
//! running position starts at 0 and only ever advances, so the expanded
//! values are strictly increasing and duplicate free by construction.

use crate::bitset::BitSet;

use super::DecodeError;
use super::DecodeLimits;

/// Counts the values that `runs` expand to, without allocating them.
///
/// ## Errors
/// * `ArithmeticOverflow` - the combined run lengths exceed `u64::MAX`
pub fn count(first: bool, runs: &[u64]) -> Result<u64, DecodeError> {
    let mut position: u64 = 0;
    let mut count: u64 = 0;
    let mut set = first;

    for &run in runs {
        position = position
            .checked_add(run)
            .ok_or(DecodeError::ArithmeticOverflow)?;
        if set {
            // Set runs are a subset of the positions, so this cannot
            // overflow once the position has not.
            count += run;
        }
        set = !set;
    }

    Ok(count)
}

/// Expands `(first, runs)` into the ascending set of positions covered by
/// set runs.
///
/// The expanded size is computed and checked against `limits` before any
/// values are allocated.
///
/// ## Errors
/// * `ArithmeticOverflow` - the combined run lengths exceed `u64::MAX`
/// * `TooManyValues` - the set would exceed `limits`, or its values cannot
///   be allocated
pub fn expand(first: bool, runs: &[u64], limits: &DecodeLimits) -> Result<BitSet, DecodeError> {
    let total = count(first, runs)?;
    limits.check_value_count(total)?;

    // Unbounded limits can admit counts the allocator cannot satisfy.
    let capacity = usize::try_from(total).map_err(|_| DecodeError::TooManyValues(total))?;
    let mut values = Vec::new();
    values
        .try_reserve_exact(capacity)
        .map_err(|_| DecodeError::TooManyValues(total))?;

    let mut position: u64 = 0;
    let mut set = first;

    for &run in runs {
        // Checked by `count` above.
        let end = position + run;
        if set {
            values.extend(position..end);
        }
        position = end;
        set = !set;
    }

    Ok(BitSet::from_sorted_unchecked(values))
}
