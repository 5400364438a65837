//! Options, groups and the catalog the search runs over.

use super::types::Session;

/// One selectable alternative for a [`Group`].
///
/// Typically a specific section of a course taught by a specific
/// instructor. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionOption {
    /// Display label, e.g. `"Microeconomics (Smith)"`.
    pub id: String,
    /// Weekly time blocks attended when this option is chosen.
    pub sessions: Vec<Session>,
    /// Quality score. Higher is better; may be fractional or negative.
    pub score: f64,
}

impl SectionOption {
    /// Creates a new option.
    pub fn new(id: impl Into<String>, sessions: Vec<Session>, score: f64) -> Self {
        Self {
            id: id.into(),
            sessions,
            score,
        }
    }
}

/// A decision point: exactly one of its options is chosen.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Group {
    /// Group identifier from the catalog.
    pub name: String,
    /// Alternatives in catalog order. Must not be empty.
    pub options: Vec<SectionOption>,
}

impl Group {
    /// Creates a new group.
    pub fn new(name: impl Into<String>, options: Vec<SectionOption>) -> Self {
        Self {
            name: name.into(),
            options,
        }
    }
}

/// Ordered list of groups.
///
/// Group order fixes the enumeration order of candidates and therefore
/// the tie-break between candidates of equal utility.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Catalog {
    pub groups: Vec<Group>,
}

impl Catalog {
    /// Creates a catalog from groups in the given order.
    pub fn new(groups: Vec<Group>) -> Self {
        Self { groups }
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the catalog has no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of options across all groups.
    pub fn option_count(&self) -> usize {
        self.groups.iter().map(|g| g.options.len()).sum()
    }

    /// Size of the candidate space: the product of option counts.
    ///
    /// Returns `None` if the product overflows `u64`.
    pub fn candidate_count(&self) -> Option<u64> {
        self.groups
            .iter()
            .try_fold(1u64, |acc, g| acc.checked_mul(g.options.len() as u64))
    }

    /// Validates the catalog.
    ///
    /// Returns `Err` with a description if a group has no options or a
    /// session is malformed.
    pub fn validate(&self) -> Result<(), String> {
        for group in &self.groups {
            if group.options.is_empty() {
                return Err(format!("group '{}' has no options", group.name));
            }
            for option in &group.options {
                if !option.score.is_finite() {
                    return Err(format!(
                        "option '{}' in group '{}' has a non-finite score",
                        option.id, group.name
                    ));
                }
                if let Some(s) = option.sessions.iter().find(|s| !s.is_well_formed()) {
                    return Err(format!(
                        "option '{}' in group '{}' has a malformed session on {} ({} to {})",
                        option.id, group.name, s.day, s.start, s.end
                    ));
                }
            }
        }
        Ok(())
    }
}
