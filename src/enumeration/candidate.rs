//! Candidate representation.

use crate::model::{Group, SectionOption};

/// One complete timetable: the chosen option index for every group.
///
/// `choices[g]` indexes into `groups[g].options`. Candidates are cheap to
/// clone and carry no borrowed data, so they can outlive a search and be
/// resolved against the catalog later.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Candidate {
    choices: Vec<usize>,
}

impl Candidate {
    /// Creates a candidate from explicit choices.
    pub fn new(choices: Vec<usize>) -> Self {
        Self { choices }
    }

    /// Option index chosen for each group.
    pub fn choices(&self) -> &[usize] {
        &self.choices
    }

    /// Number of groups covered.
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    /// Whether the candidate covers no groups.
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Resolves the chosen options against the groups, in group order.
    ///
    /// # Panics
    /// Panics if the candidate was not produced from `groups`.
    pub fn options<'a>(&'a self, groups: &'a [Group]) -> impl Iterator<Item = &'a SectionOption> + 'a {
        resolve(groups, &self.choices)
    }
}

/// Resolves a choice vector against the groups it was enumerated from.
pub(crate) fn resolve<'a>(
    groups: &'a [Group],
    choices: &'a [usize],
) -> impl Iterator<Item = &'a SectionOption> + 'a {
    groups
        .iter()
        .zip(choices.iter())
        .map(|(g, &i)| &g.options[i])
}
