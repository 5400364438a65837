//! Utility scoring configuration.

/// Configuration for the utility function.
///
/// `utility = Σ option.score − commute_count × commute_penalty`
///
/// # Examples
///
/// ```
/// use u_timetable::utility::UtilityConfig;
///
/// let config = UtilityConfig::default().with_commute_penalty(0.5);
/// assert_eq!(config.commute_penalty, 0.5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtilityConfig {
    /// Cost subtracted per commute. Non-negative.
    ///
    /// The default is small enough that commuting only breaks ties
    /// between options of equal score.
    pub commute_penalty: f64,
}

impl Default for UtilityConfig {
    fn default() -> Self {
        Self {
            commute_penalty: 0.001,
        }
    }
}

impl UtilityConfig {
    /// Sets the commute penalty.
    pub fn with_commute_penalty(mut self, penalty: f64) -> Self {
        self.commute_penalty = penalty;
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if !self.commute_penalty.is_finite() {
            return Err("commute_penalty must be finite".into());
        }
        if self.commute_penalty < 0.0 {
            return Err("commute_penalty must be non-negative".into());
        }
        Ok(())
    }
}
