//! Timetable domain model.
//!
//! Read-only value types loaded once from a course catalog and shared by
//! every stage of the search:
//!
//! - [`DayOfWeek`], [`Location`]: closed enumerations
//! - [`Session`]: one recurring weekly time block
//! - [`SectionOption`]: one selectable alternative (a section taught by a
//!   specific instructor) with its quality score
//! - [`Group`]: a decision point; exactly one option is chosen per group
//! - [`Catalog`]: the ordered list of groups the search runs over

mod catalog;
mod types;

pub use catalog::{Catalog, Group, SectionOption};
pub use types::{DayOfWeek, Location, Session};
