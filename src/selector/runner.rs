//! Selector execution loop.
//!
//! [`SelectorRunner`] drives enumeration, scores each candidate and keeps
//! the best `top_n` by utility: validate → enumerate → evaluate → rank.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use super::config::{SearchStrategy, SelectorConfig};
use super::pruned;
use super::ranking::TopN;
use super::types::{NoopObserver, RankedCandidate, SearchObserver, SelectError, SelectionResult};
use crate::enumeration::{resolve, CandidateSpace, Cursor};
use crate::model::{Catalog, Group};
use crate::utility::{Utility, UtilityEvaluator};

/// Candidates processed between cancellation checks and progress flushes.
const CHECK_INTERVAL: u64 = 1024;

/// Executes the timetable search.
///
/// # Usage
///
/// ```
/// use u_timetable::model::{Catalog, DayOfWeek, Group, Location, SectionOption, Session};
/// use u_timetable::selector::{SelectorConfig, SelectorRunner};
///
/// let mon = |s, e| Session::new(DayOfWeek::Monday, s, e, Location::Economics);
/// let catalog = Catalog::new(vec![
///     Group::new("1", vec![
///         SectionOption::new("Algebra (Ruiz)", vec![mon(8.0, 10.0)], 4.0),
///         SectionOption::new("Algebra (Vera)", vec![mon(10.0, 12.0)], 3.0),
///     ]),
///     Group::new("2", vec![
///         SectionOption::new("Statistics (Lima)", vec![mon(8.0, 10.0)], 5.0),
///     ]),
/// ]);
///
/// let result = SelectorRunner::run(&catalog, &SelectorConfig::default()).unwrap();
/// let best = result.best().unwrap();
/// let ids: Vec<&str> = best.options(&catalog.groups).map(|o| o.id.as_str()).collect();
/// assert_eq!(ids, ["Algebra (Vera)", "Statistics (Lima)"]);
/// ```
pub struct SelectorRunner;

impl SelectorRunner {
    /// Runs the search to completion.
    pub fn run(catalog: &Catalog, config: &SelectorConfig) -> Result<SelectionResult, SelectError> {
        Self::run_observed(catalog, config, &NoopObserver, None)
    }

    /// Runs the search with an optional cancellation token.
    ///
    /// If `cancel` is set to `true` during the run, the search stops at the
    /// next check and returns the best candidates found so far with
    /// [`cancelled`](SelectionResult::cancelled) set.
    pub fn run_with_cancel(
        catalog: &Catalog,
        config: &SelectorConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SelectionResult, SelectError> {
        Self::run_observed(catalog, config, &NoopObserver, cancel)
    }

    /// Runs the search, reporting progress to `observer`.
    pub fn run_observed<O: SearchObserver + ?Sized>(
        catalog: &Catalog,
        config: &SelectorConfig,
        observer: &O,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SelectionResult, SelectError> {
        config.validate().map_err(SelectError::InvalidConfig)?;
        catalog.validate().map_err(SelectError::InvalidCatalog)?;

        let space = CandidateSpace::new(&catalog.groups);
        let space_size = space.len().ok_or(SelectError::SpaceTooLarge {
            groups: catalog.len(),
        })?;

        info!(
            groups = catalog.len(),
            options = catalog.option_count(),
            space_size,
            strategy = ?config.strategy,
            top_n = config.top_n,
            parallel = config.parallel,
            "starting timetable search"
        );

        let started = Instant::now();
        observer.on_start(space_size);

        let processed = AtomicU64::new(0);
        let mut tracker = Tracker {
            observer,
            cancel: cancel.as_deref(),
            processed: &processed,
            space_size,
            interval: config.progress_interval,
            pending: 0,
        };
        let partial = dispatch(&space, config, &mut tracker);

        let result = SelectionResult {
            ranked: partial.top.into_vec(),
            space_size,
            evaluated: partial.evaluated,
            feasible: partial.feasible,
            pruned: partial.pruned,
            cancelled: partial.cancelled,
            elapsed_ms: started.elapsed().as_millis() as u64,
        };

        if result.cancelled {
            warn!(evaluated = result.evaluated, "timetable search cancelled");
        }
        match result.best() {
            Some(best) => info!(
                best_utility = best.utility(),
                evaluated = result.evaluated,
                feasible = result.feasible,
                pruned = result.pruned,
                elapsed_ms = result.elapsed_ms,
                "timetable search finished"
            ),
            None => info!(
                evaluated = result.evaluated,
                pruned = result.pruned,
                elapsed_ms = result.elapsed_ms,
                "no feasible timetable found"
            ),
        }

        observer.on_finish(&result);
        Ok(result)
    }
}

fn dispatch<O: SearchObserver + ?Sized>(
    space: &CandidateSpace<'_>,
    config: &SelectorConfig,
    tracker: &mut Tracker<'_, O>,
) -> Partial {
    #[cfg(feature = "parallel")]
    {
        if config.parallel {
            return match config.strategy {
                SearchStrategy::Exhaustive => scan_parallel(space, config, tracker),
                SearchStrategy::Pruned => pruned::search_parallel(space.groups(), config, tracker),
            };
        }
    }
    #[cfg(not(feature = "parallel"))]
    {
        if config.parallel {
            warn!("parallel evaluation requested without the `parallel` feature; running sequentially");
        }
    }

    match config.strategy {
        SearchStrategy::Exhaustive => scan(space.groups(), space.cursor(0, None), config, tracker),
        SearchStrategy::Pruned => pruned::search(space.groups(), config, tracker),
    }
}

/// Scores every candidate the cursor visits.
fn scan<O: SearchObserver + ?Sized>(
    groups: &[Group],
    mut cursor: Cursor,
    config: &SelectorConfig,
    tracker: &mut Tracker<'_, O>,
) -> Partial {
    let mut evaluator = UtilityEvaluator::new(config.utility);
    let mut partial = Partial::new(config.top_n);

    while !cursor.is_done() {
        let evaluation = evaluator.evaluate(resolve(groups, cursor.choices()));
        partial.evaluated += 1;

        if let Utility::Feasible(utility) = evaluation.utility {
            partial.feasible += 1;
            if partial.top.admits(utility, cursor.ordinal()) {
                partial.top.insert(RankedCandidate {
                    candidate: cursor.candidate(),
                    ordinal: cursor.ordinal(),
                    evaluation,
                });
            }
        }

        cursor.advance();
        if tracker.tick(1) && !cursor.is_done() {
            partial.cancelled = true;
            break;
        }
    }

    tracker.flush();
    partial
}

/// Splits the ordinal range into chunks scored on rayon workers.
#[cfg(feature = "parallel")]
fn scan_parallel<O: SearchObserver + ?Sized>(
    space: &CandidateSpace<'_>,
    config: &SelectorConfig,
    tracker: &Tracker<'_, O>,
) -> Partial {
    use rayon::prelude::*;

    let total = tracker.space_size;
    let chunks = (rayon::current_num_threads() as u64 * 8).max(1);
    let chunk_len = total.div_ceil(chunks).max(1);
    let ranges: Vec<(u64, u64)> = std::iter::successors(Some(0u64), |&s| Some(s + chunk_len))
        .take_while(|&s| s < total)
        .map(|s| (s, (s + chunk_len).min(total)))
        .collect();

    tracing::debug!(chunks = ranges.len(), chunk_len, "scanning candidate space in parallel");

    ranges
        .into_par_iter()
        .map(|(start, end)| {
            let mut local = tracker.fork();
            scan(space.groups(), space.cursor(start, Some(end)), config, &mut local)
        })
        .reduce(|| Partial::new(config.top_n), Partial::merge)
}

/// Accumulated outcome of one worker (or of the whole run).
#[derive(Debug, Clone)]
pub(super) struct Partial {
    pub(super) top: TopN,
    pub(super) evaluated: u64,
    pub(super) feasible: u64,
    pub(super) pruned: u64,
    pub(super) cancelled: bool,
}

impl Partial {
    pub(super) fn new(top_n: usize) -> Self {
        Self {
            top: TopN::new(top_n),
            evaluated: 0,
            feasible: 0,
            pruned: 0,
            cancelled: false,
        }
    }

    #[cfg(feature = "parallel")]
    pub(super) fn merge(self, other: Partial) -> Partial {
        Partial {
            top: self.top.merge(other.top),
            evaluated: self.evaluated + other.evaluated,
            feasible: self.feasible + other.feasible,
            pruned: self.pruned + other.pruned,
            cancelled: self.cancelled || other.cancelled,
        }
    }
}

/// Batches progress reporting and cancellation checks for one worker.
///
/// Progress is accumulated in a shared counter so observers see a single
/// monotone count regardless of how many workers run.
pub(super) struct Tracker<'a, O: SearchObserver + ?Sized> {
    observer: &'a O,
    cancel: Option<&'a AtomicBool>,
    processed: &'a AtomicU64,
    space_size: u64,
    interval: u64,
    pending: u64,
}

impl<'a, O: SearchObserver + ?Sized> Tracker<'a, O> {
    /// Records `n` processed candidates. Returns `true` if the search
    /// should stop.
    pub(super) fn tick(&mut self, n: u64) -> bool {
        self.pending = self.pending.saturating_add(n);
        if self.pending < CHECK_INTERVAL {
            return false;
        }
        self.flush();
        self.is_cancelled()
    }

    /// Publishes pending progress to the shared counter.
    pub(super) fn flush(&mut self) {
        if self.pending == 0 {
            return;
        }
        let n = std::mem::take(&mut self.pending);
        let before = self.processed.fetch_add(n, Ordering::Relaxed);
        let after = before.saturating_add(n);
        if after / self.interval != before / self.interval {
            self.observer.on_progress(after, self.space_size);
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// A tracker for another worker sharing the same counter and token.
    #[cfg(feature = "parallel")]
    pub(super) fn fork(&self) -> Tracker<'a, O> {
        Tracker {
            observer: self.observer,
            cancel: self.cancel,
            processed: self.processed,
            space_size: self.space_size,
            interval: self.interval,
            pending: 0,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
