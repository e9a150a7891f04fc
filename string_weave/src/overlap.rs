use crate::pair::PegPair;

/// How many times each pair of pegs has been linked. Counts never decrease.
#[derive(Clone, Debug)]
pub struct OverlapTracker {
    counts: Vec<u32>,
}

impl OverlapTracker {
    pub fn new(peg_count: usize) -> Self {
        Self {
            counts: vec![0; PegPair::count(peg_count)],
        }
    }

    pub fn count(&self, pair: PegPair) -> u32 {
        self.counts.get(pair.index()).copied().unwrap_or(0)
    }

    pub fn increment(&mut self, pair: PegPair) {
        if let Some(count) = self.counts.get_mut(pair.index()) {
            *count += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_each_pair_independently_of_order() {
        let mut tracker = OverlapTracker::new(10);
        let pair = PegPair::new(3, 8).expect("distinct pegs");
        assert_eq!(tracker.count(pair), 0);
        tracker.increment(pair);
        tracker.increment(PegPair::new(8, 3).expect("distinct pegs"));
        assert_eq!(tracker.count(pair), 2);
        assert_eq!(tracker.count(PegPair::new(3, 7).expect("distinct pegs")), 0);
    }
}
