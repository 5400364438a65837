//! Selector configuration.

use crate::utility::UtilityConfig;

/// How the candidate space is traversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStrategy {
    /// Score every candidate of the cartesian product.
    #[default]
    Exhaustive,

    /// Depth-first over groups, skipping every completion of a partial
    /// assignment that already contains an overlap.
    ///
    /// Skipped candidates are all infeasible, so the ranked output is
    /// identical to [`Exhaustive`](Self::Exhaustive); only the counters
    /// differ.
    Pruned,
}

/// Configuration for the [`SelectorRunner`](super::SelectorRunner).
///
/// # Examples
///
/// ```
/// use u_timetable::selector::{SearchStrategy, SelectorConfig};
///
/// let config = SelectorConfig::default()
///     .with_top_n(5)
///     .with_commute_penalty(0.01)
///     .with_strategy(SearchStrategy::Pruned);
/// assert_eq!(config.top_n, 5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SelectorConfig {
    /// Number of best candidates to retain. `1` keeps only the best.
    pub top_n: usize,

    /// Utility scoring parameters.
    pub utility: UtilityConfig,

    /// Traversal strategy.
    pub strategy: SearchStrategy,

    /// Whether to spread evaluation across rayon workers.
    ///
    /// Only honoured when the crate is built with the `parallel` feature;
    /// the ranked output is the same either way.
    pub parallel: bool,

    /// Report progress to the observer roughly every this many candidates.
    pub progress_interval: u64,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            top_n: 1,
            utility: UtilityConfig::default(),
            strategy: SearchStrategy::default(),
            parallel: false,
            progress_interval: 100_000,
        }
    }
}

impl SelectorConfig {
    /// Sets how many candidates to retain.
    pub fn with_top_n(mut self, n: usize) -> Self {
        self.top_n = n;
        self
    }

    /// Sets the utility configuration.
    pub fn with_utility(mut self, utility: UtilityConfig) -> Self {
        self.utility = utility;
        self
    }

    /// Shorthand for setting the commute penalty.
    pub fn with_commute_penalty(mut self, penalty: f64) -> Self {
        self.utility = self.utility.with_commute_penalty(penalty);
        self
    }

    /// Sets the traversal strategy.
    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the progress reporting interval.
    pub fn with_progress_interval(mut self, n: u64) -> Self {
        self.progress_interval = n;
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.top_n == 0 {
            return Err("top_n must be at least 1".into());
        }
        if self.progress_interval == 0 {
            return Err("progress_interval must be at least 1".into());
        }
        self.utility.validate()
    }
}
