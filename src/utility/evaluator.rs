//! Candidate scoring.

use std::cmp::Ordering;

use super::config::UtilityConfig;
use crate::feasibility::{is_feasible_sorted, sort_by_start};
use crate::model::{DayOfWeek, SectionOption, Session};

/// Utility of a candidate timetable.
///
/// `Infeasible` compares below every feasible value, so a ranking can
/// never prefer an overlapping timetable over a valid one.
#[derive(Debug, Clone, Copy)]
pub enum Utility {
    /// No overlaps; summed score minus weighted commutes.
    Feasible(f64),
    /// Two sessions overlap on some day.
    Infeasible,
}

impl Utility {
    /// The utility value, or `None` if infeasible.
    pub fn value(self) -> Option<f64> {
        match self {
            Utility::Feasible(v) => Some(v),
            Utility::Infeasible => None,
        }
    }

    /// Whether the candidate has no overlaps.
    pub fn is_feasible(self) -> bool {
        matches!(self, Utility::Feasible(_))
    }

    /// Converts to `f64`, mapping infeasible to negative infinity.
    pub fn to_f64(self) -> f64 {
        self.value().unwrap_or(f64::NEG_INFINITY)
    }

    /// Total order: infeasible first, then feasible values ascending.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Utility::Infeasible, Utility::Infeasible) => Ordering::Equal,
            (Utility::Infeasible, Utility::Feasible(_)) => Ordering::Less,
            (Utility::Feasible(_), Utility::Infeasible) => Ordering::Greater,
            (Utility::Feasible(a), Utility::Feasible(b)) => a.total_cmp(b),
        }
    }
}

impl PartialEq for Utility {
    fn eq(&self, other: &Self) -> bool {
        self.total_cmp(other) == Ordering::Equal
    }
}

impl PartialOrd for Utility {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.total_cmp(other))
    }
}

/// Full breakdown of one candidate's score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Final utility.
    pub utility: Utility,
    /// Sum of option scores, in group order.
    pub base_score: f64,
    /// Commutes across the week. Always 0 for infeasible candidates.
    pub commute_count: usize,
}

/// Scores candidates, reusing per-day scratch buckets between calls.
///
/// # Usage
///
/// ```
/// use u_timetable::model::{DayOfWeek, Location, SectionOption, Session};
/// use u_timetable::utility::{Utility, UtilityConfig, UtilityEvaluator};
///
/// let a = SectionOption::new(
///     "Algebra (Ruiz)",
///     vec![Session::new(DayOfWeek::Monday, 8.0, 10.0, Location::Economics)],
///     3.0,
/// );
/// let b = SectionOption::new(
///     "History (Paz)",
///     vec![Session::new(DayOfWeek::Monday, 12.0, 14.0, Location::Law)],
///     2.0,
/// );
///
/// let mut evaluator = UtilityEvaluator::new(UtilityConfig::default().with_commute_penalty(0.5));
/// let eval = evaluator.evaluate([&a, &b]);
/// assert_eq!(eval.commute_count, 2);
/// assert_eq!(eval.utility, Utility::Feasible(4.0));
/// ```
#[derive(Debug, Clone)]
pub struct UtilityEvaluator {
    config: UtilityConfig,
    buckets: [Vec<Session>; DayOfWeek::COUNT],
}

impl UtilityEvaluator {
    /// Creates an evaluator with empty scratch buckets.
    pub fn new(config: UtilityConfig) -> Self {
        Self {
            config,
            buckets: Default::default(),
        }
    }

    /// The scoring configuration.
    pub fn config(&self) -> &UtilityConfig {
        &self.config
    }

    /// Evaluates one candidate given its chosen options.
    ///
    /// 1. Bucket every session by day and sort each bucket by start.
    /// 2. Any overlap makes the candidate [`Utility::Infeasible`].
    /// 3. Otherwise subtract `commute_count × commute_penalty` from the
    ///    summed option score.
    pub fn evaluate<'a, I>(&mut self, options: I) -> Evaluation
    where
        I: IntoIterator<Item = &'a SectionOption>,
    {
        for bucket in &mut self.buckets {
            bucket.clear();
        }

        let mut base_score = 0.0;
        for option in options {
            base_score += option.score;
            for session in &option.sessions {
                self.buckets[session.day.index()].push(*session);
            }
        }

        for bucket in &mut self.buckets {
            sort_by_start(bucket);
        }

        if !is_feasible_sorted(&self.buckets) {
            return Evaluation {
                utility: Utility::Infeasible,
                base_score,
                commute_count: 0,
            };
        }

        let commute_count: usize = self.buckets.iter().map(|day| count_commutes(day)).sum();
        let utility = base_score - commute_count as f64 * self.config.commute_penalty;

        Evaluation {
            utility: Utility::Feasible(utility),
            base_score,
            commute_count,
        }
    }
}

/// Counts trips within one day.
///
/// Remote sessions are ignored. Every in-person session is one trip unless
/// it starts exactly when the previous in-person session ends at the same
/// site, so a day attended in person costs at least one trip.
///
/// `sorted` must be ordered by start.
pub fn count_commutes(sorted: &[Session]) -> usize {
    let mut prev: Option<&Session> = None;
    let mut count = 0;
    for session in sorted.iter().filter(|s| !s.location.is_remote()) {
        if !prev.is_some_and(|p| p.is_contiguous_with(session)) {
            count += 1;
        }
        prev = Some(session);
    }
    count
}

/// One-shot evaluation with a fresh evaluator.
///
/// Prefer reusing a [`UtilityEvaluator`] when scoring many candidates.
pub fn evaluate<'a, I>(options: I, config: &UtilityConfig) -> Evaluation
where
    I: IntoIterator<Item = &'a SectionOption>,
{
    UtilityEvaluator::new(*config).evaluate(options)
}
