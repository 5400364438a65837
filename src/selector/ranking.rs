//! Bounded best-first retention of ranked candidates.

use std::cmp::Ordering;

use super::types::RankedCandidate;

/// Ranking order between two (utility, ordinal) keys.
///
/// `Less` means `a` ranks ahead of `b`: higher utility first, then the
/// candidate enumerated earlier.
pub(crate) fn rank_cmp(a: (f64, u64), b: (f64, u64)) -> Ordering {
    b.0.total_cmp(&a.0).then(a.1.cmp(&b.1))
}

/// Keeps the `capacity` best candidates, sorted best first.
///
/// Ordinals are unique within a search, so the ranking is a strict total
/// order and merging partial results from any number of workers yields the
/// same list as a single sequential pass.
#[derive(Debug, Clone)]
pub(crate) struct TopN {
    capacity: usize,
    entries: Vec<RankedCandidate>,
}

impl TopN {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity.min(1024)),
        }
    }

    /// Whether a candidate with this key would enter the list.
    ///
    /// Checked before building the candidate so rejected ones cost no
    /// allocation.
    pub(crate) fn admits(&self, utility: f64, ordinal: u64) -> bool {
        if self.capacity == 0 {
            return false;
        }
        match self.entries.last() {
            Some(worst) if self.entries.len() >= self.capacity => {
                rank_cmp((utility, ordinal), worst.key()) == Ordering::Less
            }
            _ => true,
        }
    }

    pub(crate) fn insert(&mut self, entry: RankedCandidate) {
        let key = entry.key();
        if !self.admits(key.0, key.1) {
            return;
        }
        let pos = self
            .entries
            .partition_point(|e| rank_cmp(e.key(), key) == Ordering::Less);
        self.entries.insert(pos, entry);
        self.entries.truncate(self.capacity);
    }

    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    pub(crate) fn merge(mut self, other: TopN) -> TopN {
        for entry in other.entries {
            self.insert(entry);
        }
        self
    }

    pub(crate) fn into_vec(self) -> Vec<RankedCandidate> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumeration::Candidate;
    use crate::utility::{Evaluation, Utility};

    fn entry(utility: f64, ordinal: u64) -> RankedCandidate {
        RankedCandidate {
            candidate: Candidate::new(vec![ordinal as usize]),
            ordinal,
            evaluation: Evaluation {
                utility: Utility::Feasible(utility),
                base_score: utility,
                commute_count: 0,
            },
        }
    }

    fn keys(top: TopN) -> Vec<(f64, u64)> {
        top.into_vec().iter().map(|e| e.key()).collect()
    }

    #[test]
    fn test_keeps_best_sorted() {
        let mut top = TopN::new(3);
        for (u, o) in [(1.0, 0), (5.0, 1), (3.0, 2), (4.0, 3), (0.5, 4)] {
            top.insert(entry(u, o));
        }
        assert_eq!(keys(top), vec![(5.0, 1), (4.0, 3), (3.0, 2)]);
    }

    #[test]
    fn test_ties_broken_by_ordinal() {
        let mut top = TopN::new(2);
        top.insert(entry(2.0, 7));
        top.insert(entry(2.0, 3));
        top.insert(entry(2.0, 5));
        assert_eq!(keys(top), vec![(2.0, 3), (2.0, 5)]);
    }

    #[test]
    fn test_admits() {
        let mut top = TopN::new(1);
        assert!(top.admits(0.0, 10));
        top.insert(entry(1.0, 4));
        assert!(!top.admits(1.0, 5));
        assert!(top.admits(1.0, 3));
        assert!(top.admits(1.5, 9));
        assert!(!top.admits(0.5, 0));
    }

    #[test]
    fn test_merge_is_order_independent() {
        let data = [(1.0, 0), (3.0, 1), (3.0, 2), (2.0, 3), (5.0, 4), (1.0, 5)];
        let mut sequential = TopN::new(4);
        for &(u, o) in &data {
            sequential.insert(entry(u, o));
        }

        let mut left = TopN::new(4);
        let mut right = TopN::new(4);
        for &(u, o) in &data[..3] {
            left.insert(entry(u, o));
        }
        for &(u, o) in &data[3..] {
            right.insert(entry(u, o));
        }
        let expected = keys(sequential);
        assert_eq!(keys(right.clone().merge(left.clone())), expected);
        assert_eq!(keys(left.merge(right)), expected);
    }
}
