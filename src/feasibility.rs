//! Per-day overlap detection.
//!
//! A candidate timetable is feasible iff no day contains two sessions that
//! share any portion of time. Sessions are half-open intervals, so a block
//! ending at 8.5 and one starting at 8.5 are compatible.
//!
//! # Algorithm
//!
//! Sort the day's sessions by start, then sweep while tracking the latest
//! end seen so far. A session overlaps an earlier one iff it starts before
//! that running maximum. Comparing against the running maximum rather than
//! only the immediate predecessor also catches a short session nested
//! inside a longer one that shares its start time.

use crate::model::{DayOfWeek, Session};

/// Returns `true` iff at least two of the given sessions overlap.
///
/// The input may be in any order; a scratch copy is sorted so the caller's
/// slice is left untouched. All sessions are assumed to be on the same day.
pub fn has_overlap(sessions: &[Session]) -> bool {
    if sessions.len() < 2 {
        return false;
    }
    let mut sorted = sessions.to_vec();
    sort_by_start(&mut sorted);
    has_overlap_sorted(&sorted)
}

/// Overlap check for sessions already sorted by start.
///
/// Allocation-free; used on the evaluation hot path.
pub fn has_overlap_sorted(sorted: &[Session]) -> bool {
    let mut iter = sorted.iter();
    let Some(first) = iter.next() else {
        return false;
    };
    let mut max_end = first.end;
    for s in iter {
        if s.start < max_end {
            return true;
        }
        max_end = max_end.max(s.end);
    }
    false
}

/// Returns `true` iff no day bucket contains an overlap.
///
/// Each bucket must already be sorted by start.
pub fn is_feasible_sorted(buckets: &[Vec<Session>; DayOfWeek::COUNT]) -> bool {
    !buckets.iter().any(|day| has_overlap_sorted(day))
}

/// Sorts sessions by start hour, ascending.
///
/// The sort is stable, so sessions with equal starts keep their supplied
/// order.
pub fn sort_by_start(sessions: &mut [Session]) {
    sessions.sort_by(|a, b| a.start.total_cmp(&b.start));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Location;
    use proptest::prelude::*;

    fn mon(start: f64, end: f64) -> Session {
        Session::new(DayOfWeek::Monday, start, end, Location::Economics)
    }

    #[test]
    fn test_empty_and_single() {
        assert!(!has_overlap(&[]));
        assert!(!has_overlap(&[mon(8.0, 10.0)]));
    }

    #[test]
    fn test_touching_is_not_overlap() {
        assert!(!has_overlap(&[mon(7.0, 8.5), mon(8.5, 10.0)]));
        assert!(!has_overlap(&[mon(8.5, 10.0), mon(7.0, 8.5)]));
    }

    #[test]
    fn test_partial_overlap() {
        assert!(has_overlap(&[mon(8.0, 10.0), mon(9.5, 11.0)]));
        assert!(has_overlap(&[mon(9.5, 11.0), mon(8.0, 10.0)]));
    }

    #[test]
    fn test_identical_sessions_overlap() {
        assert!(has_overlap(&[mon(8.0, 10.0), mon(8.0, 10.0)]));
    }

    #[test]
    fn test_nested_with_equal_start() {
        // Long block listed first: the short one is its sorted neighbour
        // and the session after it only collides with the long block.
        let sessions = [mon(8.0, 12.0), mon(8.0, 9.0), mon(10.0, 11.0)];
        assert!(has_overlap(&sessions));
        let mut sorted = sessions.to_vec();
        sort_by_start(&mut sorted);
        assert!(has_overlap_sorted(&sorted));
    }

    #[test]
    fn test_nested_not_adjacent() {
        assert!(has_overlap(&[mon(8.0, 14.0), mon(9.0, 10.0), mon(12.0, 13.0)]));
    }

    #[test]
    fn test_input_not_mutated() {
        let sessions = vec![mon(10.0, 11.0), mon(8.0, 9.0)];
        let copy = sessions.clone();
        has_overlap(&sessions);
        assert_eq!(sessions, copy);
    }

    #[test]
    fn test_is_feasible_sorted() {
        let mut buckets: [Vec<Session>; DayOfWeek::COUNT] = Default::default();
        buckets[0] = vec![mon(8.0, 9.0), mon(9.0, 10.0)];
        buckets[2] = vec![Session::new(DayOfWeek::Wednesday, 8.0, 9.0, Location::Law)];
        assert!(is_feasible_sorted(&buckets));
        buckets[0].push(mon(9.5, 10.5));
        assert!(!is_feasible_sorted(&buckets));
    }

    fn brute_force_overlap(sessions: &[Session]) -> bool {
        for i in 0..sessions.len() {
            for j in (i + 1)..sessions.len() {
                if sessions[i].overlaps(&sessions[j]) {
                    return true;
                }
            }
        }
        false
    }

    fn arb_session() -> impl Strategy<Value = Session> {
        // Half-hour grid between 7:00 and 22:00.
        (14u32..44, 1u32..8).prop_map(|(s, d)| {
            let start = s as f64 / 2.0;
            mon(start, start + d as f64 / 2.0)
        })
    }

    proptest! {
        #[test]
        fn test_matches_pairwise_check(sessions in prop::collection::vec(arb_session(), 0..8)) {
            prop_assert_eq!(has_overlap(&sessions), brute_force_overlap(&sessions));
        }

        #[test]
        fn test_order_independent(sessions in prop::collection::vec(arb_session(), 0..8)) {
            let mut reversed = sessions.clone();
            reversed.reverse();
            prop_assert_eq!(has_overlap(&sessions), has_overlap(&reversed));
        }
    }
}
