//! Timetable selection.
//!
//! Drives the enumerator, scores each candidate with the utility evaluator
//! and retains the best `top_n` feasible timetables. Ties are broken by
//! enumeration order: the candidate encountered first wins.
//!
//! Infeasible candidates are never ranked. If every candidate overlaps,
//! [`SelectionResult::ranked`] is empty and
//! [`is_feasible_found`](SelectionResult::is_feasible_found) is `false`.
//!
//! # Key Types
//!
//! - [`SelectorConfig`]: top-N, commute penalty, strategy, parallelism
//! - [`SelectorRunner`]: executes the search
//! - [`SelectionResult`]: ranked candidates plus search counters
//! - [`SearchObserver`]: optional progress hook
//!
//! # Strategies
//!
//! - [`SearchStrategy::Exhaustive`]: scores the full cartesian product
//! - [`SearchStrategy::Pruned`]: skips subtrees of overlapping partial
//!   assignments; same ranked output
//!
//! With the `parallel` feature the work is partitioned across rayon
//! workers and merged by (utility, ordinal), so the ranking does not depend
//! on the number of threads.

mod config;
mod pruned;
mod ranking;
mod runner;
mod types;

pub use config::{SearchStrategy, SelectorConfig};
pub use runner::SelectorRunner;
pub use types::{
    NoopObserver, RankedCandidate, SearchObserver, SelectError, SelectionResult,
};
