//! Catalog loading and result rendering.
//!
//! These collaborators sit outside the search core: the loader rejects
//! malformed rows before any search begins, and the renderers only format
//! sessions the selector has already chosen.
//!
//! - [`catalog`]: CSV course catalog → [`Catalog`](crate::model::Catalog)
//! - [`summary`]: console report of a selection result
//! - [`calendar`]: iCalendar export, one recurring event per session

pub mod calendar;
pub mod catalog;
mod error;
pub mod summary;

pub use calendar::{next_monday, CalendarConfig, CalendarExporter};
pub use catalog::{
    load_catalog, parse_days, parse_hours, parse_sessions, CatalogColumns, CatalogReader,
    ScheduleColumns,
};
pub use error::{CalendarError, CatalogError};
pub use summary::{format_hour, format_session, Summary};
