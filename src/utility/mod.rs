//! Candidate utility evaluation.
//!
//! Scores one candidate timetable (one option per group):
//!
//! 1. Bucket all sessions by day; sort each day by start.
//! 2. If any day has an overlap, the candidate is [`Utility::Infeasible`].
//! 3. Otherwise `utility = Σ score − commute_count × commute_penalty`,
//!    where each in-person session is one commute unless it starts when
//!    the previous in-person session of that day ends, at the same site.
//!
//! # Key Types
//!
//! - [`UtilityConfig`]: commute penalty weight
//! - [`UtilityEvaluator`]: reusable scorer with scratch per-day buckets
//! - [`Evaluation`]: utility plus its base-score / commute breakdown

mod config;
mod evaluator;

pub use config::UtilityConfig;
pub use evaluator::{count_commutes, evaluate, Evaluation, Utility, UtilityEvaluator};
