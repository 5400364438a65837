//! Branch-and-bound traversal.
//!
//! Assigns groups depth-first in enumeration order. As soon as a partial
//! assignment contains an overlap, every completion of it is infeasible and
//! the whole subtree is skipped. Leaves are visited in the same order as the
//! exhaustive enumerator and carry the same ordinals, so the ranking is
//! unchanged.

use super::runner::{Partial, Tracker};
use super::types::{RankedCandidate, SearchObserver};
use super::SelectorConfig;
use crate::enumeration::{resolve, Candidate};
use crate::model::{DayOfWeek, Group, SectionOption, Session};
use crate::utility::{Utility, UtilityEvaluator};

/// Runs the pruned search over the whole space.
pub(super) fn search<O: SearchObserver + ?Sized>(
    groups: &[Group],
    config: &SelectorConfig,
    tracker: &mut Tracker<'_, O>,
) -> Partial {
    let mut dfs = Dfs::new(groups, config);
    dfs.expand(0, 0, tracker);
    tracker.flush();
    dfs.finish()
}

/// Runs one pruned search per option of the first group on rayon workers.
#[cfg(feature = "parallel")]
pub(super) fn search_parallel<O: SearchObserver + ?Sized>(
    groups: &[Group],
    config: &SelectorConfig,
    tracker: &Tracker<'_, O>,
) -> Partial {
    use rayon::prelude::*;

    let Some(first) = groups.first() else {
        let mut local = tracker.fork();
        return search(groups, config, &mut local);
    };

    (0..first.options.len())
        .into_par_iter()
        .map(|i| {
            let mut local = tracker.fork();
            let mut dfs = Dfs::new(groups, config);
            dfs.try_option(0, i, 0, &mut local);
            local.flush();
            dfs.finish()
        })
        .reduce(|| Partial::new(config.top_n), Partial::merge)
}

struct Dfs<'g> {
    groups: &'g [Group],
    /// `completions[d]`: candidates below one choice at depth `d`.
    completions: Vec<u64>,
    evaluator: UtilityEvaluator,
    placed: [Vec<Session>; DayOfWeek::COUNT],
    choices: Vec<usize>,
    partial: Partial,
    stopped: bool,
}

impl<'g> Dfs<'g> {
    fn new(groups: &'g [Group], config: &SelectorConfig) -> Self {
        let mut completions = vec![1u64; groups.len()];
        for d in (0..groups.len().saturating_sub(1)).rev() {
            completions[d] = completions[d + 1].saturating_mul(groups[d + 1].options.len() as u64);
        }
        Self {
            groups,
            completions,
            evaluator: UtilityEvaluator::new(config.utility),
            placed: Default::default(),
            choices: Vec::with_capacity(groups.len()),
            partial: Partial::new(config.top_n),
            stopped: false,
        }
    }

    fn finish(mut self) -> Partial {
        self.partial.cancelled = self.stopped;
        self.partial
    }

    fn expand<O: SearchObserver + ?Sized>(
        &mut self,
        depth: usize,
        ordinal: u64,
        tracker: &mut Tracker<'_, O>,
    ) {
        if depth == self.groups.len() {
            self.leaf(ordinal, tracker);
            return;
        }
        for i in 0..self.groups[depth].options.len() {
            if self.stopped {
                return;
            }
            self.try_option(depth, i, ordinal, tracker);
        }
    }

    fn try_option<O: SearchObserver + ?Sized>(
        &mut self,
        depth: usize,
        index: usize,
        base: u64,
        tracker: &mut Tracker<'_, O>,
    ) {
        let groups = self.groups;
        let option = &groups[depth].options[index];
        let ordinal = base + index as u64 * self.completions[depth];
        let marks: [usize; DayOfWeek::COUNT] = std::array::from_fn(|d| self.placed[d].len());

        if self.place(option) {
            self.choices.push(index);
            self.expand(depth + 1, ordinal, tracker);
            self.choices.pop();
        } else {
            let skipped = self.completions[depth];
            self.partial.pruned += skipped;
            if tracker.tick(skipped) {
                self.stopped = true;
            }
        }

        for (bucket, &mark) in self.placed.iter_mut().zip(&marks) {
            bucket.truncate(mark);
        }
    }

    /// Adds the option's sessions to the partial timetable. Returns `false`
    /// on the first overlap; the caller rolls back.
    fn place(&mut self, option: &SectionOption) -> bool {
        for session in &option.sessions {
            let bucket = &mut self.placed[session.day.index()];
            if bucket.iter().any(|p| p.overlaps(session)) {
                return false;
            }
            bucket.push(*session);
        }
        true
    }

    fn leaf<O: SearchObserver + ?Sized>(&mut self, ordinal: u64, tracker: &mut Tracker<'_, O>) {
        let evaluation = self.evaluator.evaluate(resolve(self.groups, &self.choices));
        self.partial.evaluated += 1;

        if let Utility::Feasible(utility) = evaluation.utility {
            self.partial.feasible += 1;
            if self.partial.top.admits(utility, ordinal) {
                self.partial.top.insert(RankedCandidate {
                    candidate: Candidate::new(self.choices.clone()),
                    ordinal,
                    evaluation,
                });
            }
        }

        if tracker.tick(1) {
            self.stopped = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{Catalog, DayOfWeek, Group, Location, SectionOption, Session};
    use crate::selector::{SearchStrategy, SelectorConfig, SelectorRunner};

    fn mon(start: f64, end: f64) -> Session {
        Session::new(DayOfWeek::Monday, start, end, Location::Law)
    }

    #[test]
    fn test_prunes_conflicting_prefix() {
        // g0 option 0 clashes with both options of g1, so its entire
        // subtree (2 × 3 = 6 candidates) is skipped after the g1 check.
        let catalog = Catalog::new(vec![
            Group::new(
                "0",
                vec![
                    SectionOption::new("wide", vec![mon(8.0, 14.0)], 10.0),
                    SectionOption::new("early", vec![mon(7.0, 8.0)], 1.0),
                ],
            ),
            Group::new(
                "1",
                vec![
                    SectionOption::new("a", vec![mon(9.0, 10.0)], 1.0),
                    SectionOption::new("b", vec![mon(12.0, 13.0)], 1.0),
                ],
            ),
            Group::new(
                "2",
                vec![
                    SectionOption::new("x", vec![], 1.0),
                    SectionOption::new("y", vec![], 2.0),
                    SectionOption::new("z", vec![], 3.0),
                ],
            ),
        ]);
        let config = SelectorConfig::default().with_strategy(SearchStrategy::Pruned);
        let result = SelectorRunner::run(&catalog, &config).unwrap();

        assert_eq!(result.space_size, 12);
        assert_eq!(result.pruned, 6);
        assert_eq!(result.evaluated, 6);
        assert_eq!(result.feasible, 6);

        let best = result.best().unwrap();
        let ids: Vec<&str> = best.options(&catalog.groups).map(|o| o.id.as_str()).collect();
        assert_eq!(ids, ["early", "a", "z"]);
        // early/a/z is ordinal 1*6 + 0*3 + 2
        assert_eq!(best.ordinal, 8);
    }

    #[test]
    fn test_self_overlapping_option_pruned_at_root() {
        let catalog = Catalog::new(vec![
            Group::new(
                "0",
                vec![SectionOption::new("broken", vec![mon(8.0, 10.0), mon(9.0, 11.0)], 1.0)],
            ),
            Group::new(
                "1",
                vec![
                    SectionOption::new("a", vec![], 1.0),
                    SectionOption::new("b", vec![], 1.0),
                ],
            ),
        ]);
        let config = SelectorConfig::default().with_strategy(SearchStrategy::Pruned);
        let result = SelectorRunner::run(&catalog, &config).unwrap();
        assert_eq!(result.pruned, 2);
        assert_eq!(result.evaluated, 0);
        assert!(!result.is_feasible_found());
    }
}
