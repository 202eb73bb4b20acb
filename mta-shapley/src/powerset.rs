//! Power-set enumeration over index ranges
//!
//! Subsets of `{0, .., size - 1}` are identified by a bit mask: subset `i`
//! contains element `j` iff bit `j` of `i` is set. Enumerating the masks in
//! counter order visits every subset exactly once, and a mask range can be
//! split across workers without materializing the subsets. Sets larger than
//! [`MAX_POWER_SET_SIZE`] elements are refused rather than enumerated.

use std::iter::FusedIterator;
use std::ops::Range;

/// Largest `size` whose power set fits a `u64` mask range
pub const MAX_POWER_SET_SIZE: usize = 63;

/// Iterator over every subset of `{0, .., size - 1}`, in counter order
#[derive(Debug, Clone)]
pub struct PowerSet {
    size: usize,
    masks: Range<u64>,
}

impl PowerSet {
    /// Number of elements the subsets are drawn from
    pub fn size(&self) -> usize {
        self.size
    }

    /// Remaining masks, for partitioning the walk
    pub fn masks(&self) -> Range<u64> {
        self.masks.clone()
    }
}

/// The power set of `{0, .., size - 1}`
///
/// `size == 0` yields exactly one subset, the empty set. Returns `None` when
/// `size` exceeds [`MAX_POWER_SET_SIZE`].
pub fn power_set_indices(size: usize) -> Option<PowerSet> {
    (size <= MAX_POWER_SET_SIZE).then(|| PowerSet {
        size,
        masks: 0..subset_count(size),
    })
}

/// Number of subsets of a `size`-element set
///
/// `size` must not exceed [`MAX_POWER_SET_SIZE`].
pub fn subset_count(size: usize) -> u64 {
    1u64 << size
}

/// Element indices selected by `mask`, ascending
pub fn subset_indices(mask: u64, size: usize) -> Vec<usize> {
    (0..size).filter(|&j| mask & (1u64 << j) != 0).collect()
}

impl Iterator for PowerSet {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let mask = self.masks.next()?;
        Some(subset_indices(mask, self.size))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.masks.size_hint()
    }
}

impl ExactSizeIterator for PowerSet {}

impl FusedIterator for PowerSet {}
