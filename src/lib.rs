//! Exhaustive weekly timetable selection.
//!
//! Given a catalog of course groups, each offering several mutually
//! exclusive sections, picks the combination (one section per group) that
//! maximizes total quality score minus a commute penalty, rejecting any
//! combination in which two sessions overlap on the same day.
//!
//! - **Model** ([`model`]): days, locations, sessions, options, groups.
//! - **Feasibility** ([`feasibility`]): per-day overlap detection.
//! - **Utility** ([`utility`]): summed score minus weighted commute count.
//! - **Enumeration** ([`enumeration`]): lazy cartesian product of options.
//! - **Selector** ([`selector`]): drives the search, keeps the best or
//!   top-N candidates, optionally pruned and/or parallel.
//! - **I/O** ([`io`]): CSV catalog loading, console summaries and
//!   iCalendar export of chosen timetables.
//!
//! # Architecture
//!
//! The search core (`model` through `selector`) is a pure, deterministic
//! computation over read-only catalog data. Loading, rendering and progress
//! reporting sit outside it and cannot influence which timetable wins.

pub mod enumeration;
pub mod feasibility;
pub mod io;
pub mod model;
pub mod selector;
pub mod utility;
