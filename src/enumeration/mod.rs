//! Candidate enumeration.
//!
//! Produces every timetable obtainable by choosing exactly one option from
//! each group: the full cartesian product, whose size is the product of the
//! groups' option counts. Enumeration is exhaustive, lazy, deterministic and
//! restartable.
//!
//! # Key Types
//!
//! - [`Candidate`]: chosen option index per group
//! - [`CandidateSpace`]: the product space; iterators, ordinal encode/decode
//! - [`CandidateIter`]: lazy iterator of owned candidates
//! - [`Cursor`]: allocation-free odometer for hot loops

mod candidate;
mod space;

pub use candidate::Candidate;
pub use space::{CandidateIter, CandidateSpace, Cursor};

pub(crate) use candidate::resolve;
