use serde::{Deserialize, Serialize};

use crate::Error;

/// Unordered pair of distinct pegs, stored with the smaller index first so that
/// `(a, b)` and `(b, a)` share every table entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PegPair {
    low: usize,
    high: usize,
}

impl PegPair {
    pub fn new(a: usize, b: usize) -> Result<Self, Error> {
        if a == b {
            Err(Error::SamePeg(a))
        } else {
            Ok(Self::ordered(a, b))
        }
    }

    /// Caller guarantees `a != b`.
    pub(crate) fn ordered(a: usize, b: usize) -> Self {
        debug_assert_ne!(a, b);
        if a < b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn low(&self) -> usize {
        self.low
    }

    pub fn high(&self) -> usize {
        self.high
    }

    /// Position of the pair in a flat lower-triangular table.
    pub fn index(&self) -> usize {
        self.high * (self.high - 1) / 2 + self.low
    }

    /// Number of distinct pairs on a board of `peg_count` pegs.
    pub fn count(peg_count: usize) -> usize {
        peg_count * peg_count.saturating_sub(1) / 2
    }

    /// Every pair of the board, in [`Self::index`] order.
    pub fn all(peg_count: usize) -> impl Iterator<Item = Self> {
        (1..peg_count).flat_map(|high| (0..high).map(move |low| Self { low, high }))
    }
}
