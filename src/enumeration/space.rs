//! Lazy cartesian-product enumeration.
//!
//! Candidates are produced in lexicographic order over group order and each
//! group's option order: the last group varies fastest. Every candidate has
//! an *ordinal*, its zero-based position in that order, which doubles as the
//! tie-breaker between candidates of equal utility.

use super::candidate::Candidate;
use crate::model::Group;

/// The space of all candidates for an ordered list of groups.
///
/// Holds only a borrow of the groups; creating iterators never mutates
/// them, and each iterator is independent of the others.
#[derive(Debug, Clone)]
pub struct CandidateSpace<'a> {
    groups: &'a [Group],
    radices: Vec<usize>,
}

impl<'a> CandidateSpace<'a> {
    /// Creates the space for the given groups.
    pub fn new(groups: &'a [Group]) -> Self {
        let radices = groups.iter().map(|g| g.options.len()).collect();
        Self { groups, radices }
    }

    /// The groups this space enumerates.
    pub fn groups(&self) -> &'a [Group] {
        self.groups
    }

    /// Option count per group.
    pub fn radices(&self) -> &[usize] {
        &self.radices
    }

    /// Number of candidates, or `None` if it does not fit in `u64`.
    ///
    /// A space over zero groups has exactly one (empty) candidate; a space
    /// containing an empty group has none.
    pub fn len(&self) -> Option<u64> {
        self.radices
            .iter()
            .try_fold(1u64, |acc, &r| acc.checked_mul(r as u64))
    }

    /// Whether the space has no candidates.
    pub fn is_empty(&self) -> bool {
        self.radices.contains(&0)
    }

    /// Iterates every candidate from the start.
    pub fn iter(&self) -> CandidateIter {
        CandidateIter {
            cursor: self.cursor(0, None),
        }
    }

    /// Iterates candidates with ordinals in `start..end`.
    pub fn iter_range(&self, start: u64, end: u64) -> CandidateIter {
        CandidateIter {
            cursor: self.cursor(start, Some(end)),
        }
    }

    /// Allocation-free cursor positioned at `start`.
    ///
    /// With `end = None` the cursor runs to the end of the space.
    pub fn cursor(&self, start: u64, end: Option<u64>) -> Cursor {
        Cursor::new(self.radices.clone(), start, end)
    }

    /// Decodes the candidate at `ordinal`, or `None` if out of range.
    pub fn candidate_at(&self, ordinal: u64) -> Option<Candidate> {
        let cursor = self.cursor(ordinal, None);
        if cursor.is_done() {
            None
        } else {
            Some(cursor.candidate())
        }
    }

    /// Encodes a choice vector into its ordinal.
    ///
    /// Returns `None` if the choices do not belong to this space or the
    /// ordinal overflows `u64`.
    pub fn ordinal_of(&self, choices: &[usize]) -> Option<u64> {
        if choices.len() != self.radices.len() {
            return None;
        }
        self.radices
            .iter()
            .zip(choices)
            .try_fold(0u64, |acc, (&r, &c)| {
                if c >= r {
                    return None;
                }
                acc.checked_mul(r as u64)?.checked_add(c as u64)
            })
    }
}

/// Odometer over the candidate space.
///
/// Exposes the current choice vector by reference so hot loops can score
/// candidates without allocating.
#[derive(Debug, Clone)]
pub struct Cursor {
    radices: Vec<usize>,
    choices: Vec<usize>,
    ordinal: u64,
    end: Option<u64>,
    done: bool,
}

impl Cursor {
    fn new(radices: Vec<usize>, start: u64, end: Option<u64>) -> Self {
        let mut choices = vec![0; radices.len()];
        let mut rest = start;
        for (c, &r) in choices.iter_mut().zip(&radices).rev() {
            if r > 0 {
                *c = (rest % r as u64) as usize;
                rest /= r as u64;
            }
        }
        let done = radices.contains(&0) || rest > 0 || end.is_some_and(|e| start >= e);
        Self {
            radices,
            choices,
            ordinal: start,
            end,
            done,
        }
    }

    /// Whether the cursor has moved past its last candidate.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Current option index per group.
    pub fn choices(&self) -> &[usize] {
        &self.choices
    }

    /// Ordinal of the current candidate.
    pub fn ordinal(&self) -> u64 {
        self.ordinal
    }

    /// Owned copy of the current candidate.
    pub fn candidate(&self) -> Candidate {
        Candidate::new(self.choices.clone())
    }

    /// Moves to the next candidate in enumeration order.
    pub fn advance(&mut self) {
        if self.done {
            return;
        }
        self.ordinal = self.ordinal.saturating_add(1);
        if self.end.is_some_and(|e| self.ordinal >= e) {
            self.done = true;
            return;
        }
        for i in (0..self.choices.len()).rev() {
            self.choices[i] += 1;
            if self.choices[i] < self.radices[i] {
                return;
            }
            self.choices[i] = 0;
        }
        // Every digit rolled over: the space is exhausted.
        self.done = true;
    }

    /// Candidates left, including the current one, if known.
    fn remaining(&self) -> Option<u64> {
        if self.done {
            return Some(0);
        }
        let total = self
            .radices
            .iter()
            .try_fold(1u64, |acc, &r| acc.checked_mul(r as u64))?;
        let end = self.end.map_or(total, |e| e.min(total));
        Some(end.saturating_sub(self.ordinal))
    }
}

/// Lazy iterator over candidates. Dropping it early is always safe.
#[derive(Debug, Clone)]
pub struct CandidateIter {
    cursor: Cursor,
}

impl Iterator for CandidateIter {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        if self.cursor.is_done() {
            return None;
        }
        let candidate = self.cursor.candidate();
        self.cursor.advance();
        Some(candidate)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.cursor.remaining().and_then(|r| usize::try_from(r).ok()) {
            Some(n) => (n, Some(n)),
            None => (usize::MAX, None),
        }
    }
}
