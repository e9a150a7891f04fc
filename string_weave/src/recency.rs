use std::collections::VecDeque;

/// Fixed-capacity window of the most recently visited pegs.
///
/// Starts full of the start peg. Every push evicts the oldest entry, and a ring
/// of capacity zero never holds anything.
#[derive(Clone, Debug)]
pub struct RecencyRing {
    pegs: VecDeque<usize>,
    capacity: usize,
}

impl RecencyRing {
    pub fn new(capacity: usize, start: usize) -> Self {
        Self {
            pegs: std::iter::repeat(start).take(capacity).collect(),
            capacity,
        }
    }

    pub fn push(&mut self, peg: usize) {
        if self.capacity == 0 {
            return;
        }
        self.pegs.pop_front();
        self.pegs.push_back(peg);
    }

    pub fn contains(&self, peg: usize) -> bool {
        self.pegs.contains(&peg)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.pegs.iter().copied()
    }
}
