//! Loader and exporter errors.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while loading a course catalog.
///
/// Any of these aborts the run before the search starts.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The file could not be opened.
    #[error("failed to open catalog '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV structure itself is broken (bad quoting, ragged rows, ...).
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A configured column is absent from the header.
    #[error("missing column '{0}'")]
    MissingColumn(String),

    /// A row has an inconsistent or unparsable field.
    #[error("line {line}: {message}")]
    Row { line: u64, message: String },
}

/// Errors raised while exporting calendar files.
#[derive(Debug, Error)]
pub enum CalendarError {
    /// The representative week must start on a Monday.
    #[error("week start {0} is not a Monday")]
    WeekStartNotMonday(NaiveDate),

    /// At least one weekly occurrence is required.
    #[error("recurrence count must be at least 1")]
    ZeroWeeks,

    /// A session hour cannot be placed on the calendar.
    #[error("session hour {0} is out of range")]
    HourOutOfRange(f64),

    /// The output file could not be written.
    #[error("failed to write calendar '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
