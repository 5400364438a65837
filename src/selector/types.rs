//! Result, observer and error types for the selector.

use thiserror::Error;

use crate::enumeration::Candidate;
use crate::model::{Group, SectionOption};
use crate::utility::Evaluation;

/// A retained candidate with its score.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    /// Chosen option per group.
    pub candidate: Candidate,
    /// Position in enumeration order; breaks utility ties.
    pub ordinal: u64,
    /// Utility and its breakdown.
    pub evaluation: Evaluation,
}

impl RankedCandidate {
    /// Utility value. Retained candidates are always feasible.
    pub fn utility(&self) -> f64 {
        self.evaluation.utility.to_f64()
    }

    /// Resolves the chosen options, in group order.
    pub fn options<'a>(&'a self, groups: &'a [Group]) -> impl Iterator<Item = &'a SectionOption> + 'a {
        self.candidate.options(groups)
    }

    pub(crate) fn key(&self) -> (f64, u64) {
        (self.utility(), self.ordinal)
    }
}

/// Outcome of a selector run.
#[derive(Debug, Clone)]
pub struct SelectionResult {
    /// Best feasible candidates, best first. At most `top_n` entries.
    ///
    /// Empty when no feasible timetable exists (or the run was cancelled
    /// before finding one).
    pub ranked: Vec<RankedCandidate>,

    /// Total number of candidates in the space.
    pub space_size: u64,

    /// Candidates fully scored.
    pub evaluated: u64,

    /// Scored candidates that had no overlaps.
    pub feasible: u64,

    /// Candidates skipped by pruning without being scored.
    pub pruned: u64,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Wall-clock duration of the search in milliseconds.
    pub elapsed_ms: u64,
}

impl SelectionResult {
    /// The best candidate, if any feasible one was found.
    pub fn best(&self) -> Option<&RankedCandidate> {
        self.ranked.first()
    }

    /// Whether at least one feasible timetable was found.
    pub fn is_feasible_found(&self) -> bool {
        !self.ranked.is_empty()
    }
}

/// Receives progress notifications during a search.
///
/// Purely observational: nothing an observer does can change the result.
/// Calls may arrive from several worker threads at once.
pub trait SearchObserver: Sync {
    /// Called once before the first candidate.
    fn on_start(&self, _space_size: u64) {}

    /// Called periodically with the number of candidates processed so far
    /// (scored plus pruned).
    fn on_progress(&self, _processed: u64, _space_size: u64) {}

    /// Called once with the final result.
    fn on_finish(&self, _result: &SelectionResult) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// Errors that prevent a search from starting.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectError {
    /// A configuration parameter is out of range.
    #[error("invalid selector configuration: {0}")]
    InvalidConfig(String),

    /// The catalog has an empty group or a malformed session.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    /// The candidate count does not fit in 64 bits.
    #[error("candidate space too large to enumerate ({groups} groups)")]
    SpaceTooLarge { groups: usize },
}
