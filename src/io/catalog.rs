//! CSV course catalog loader.
//!
//! Each row describes one option. Rows sharing a group identifier form one
//! [`Group`]; groups keep the order in which they first appear. A row can
//! list sessions at several locations, one day/hour column pair per
//! location:
//!
//! ```text
//! Grupo,Materia,Docente,Puntaje,Días economicas,Horario economicas,Días online,Horario online,Días derecho,Horario derecho
//! 1,Algebra,Ruiz,8,Lu/Mi,8 a 10,,,,
//! 1,Algebra,Vera,7.5,,,Ma,18 a 20,,
//! ```
//!
//! Days are `/`-separated two-letter abbreviations; hours are
//! `"<start> a <end>"` with `.` or `,` as the decimal separator.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::{debug, info};

use super::error::CatalogError;
use crate::model::{Catalog, DayOfWeek, Group, Location, SectionOption, Session};

/// One day/hour column pair and the location its sessions take place at.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleColumns {
    /// Column holding `/`-separated day abbreviations.
    pub days: String,
    /// Column holding the `"<start> a <end>"` hour range.
    pub hours: String,
    /// Location assigned to the sessions parsed from this pair.
    pub location: Location,
}

impl ScheduleColumns {
    /// Creates a day/hour column pair whose sessions take place at `location`.
    pub fn new(days: impl Into<String>, hours: impl Into<String>, location: Location) -> Self {
        Self {
            days: days.into(),
            hours: hours.into(),
            location,
        }
    }
}

/// Column layout of the catalog file.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogColumns {
    /// Column holding the group identifier. Rows sharing it are alternatives.
    pub group: String,
    /// Column holding the subject name.
    pub subject: String,
    /// Column holding the instructor name.
    pub instructor: String,
    /// Column holding the option's quality score.
    pub score: String,
    /// Day/hour column pairs, one per location. Blank pairs are skipped.
    pub schedules: Vec<ScheduleColumns>,
    /// Group identifier marking rows that are listed but not offered.
    pub excluded_group: Option<String>,
}

impl Default for CatalogColumns {
    fn default() -> Self {
        Self {
            group: "Grupo".into(),
            subject: "Materia".into(),
            instructor: "Docente".into(),
            score: "Puntaje".into(),
            schedules: vec![
                ScheduleColumns::new("Días economicas", "Horario economicas", Location::Economics),
                ScheduleColumns::new("Días online", "Horario online", Location::Remote),
                ScheduleColumns::new("Días derecho", "Horario derecho", Location::Law),
            ],
            excluded_group: Some("0".into()),
        }
    }
}

/// Reads catalogs laid out according to a [`CatalogColumns`].
#[derive(Debug, Clone, Default)]
pub struct CatalogReader {
    columns: CatalogColumns,
}

impl CatalogReader {
    /// Creates a reader for a custom column layout.
    pub fn with_columns(columns: CatalogColumns) -> Self {
        Self { columns }
    }

    /// Loads a catalog from a file.
    pub fn read_path(&self, path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = self.read(file)?;
        info!(
            path = %path.display(),
            groups = catalog.len(),
            options = catalog.option_count(),
            "loaded course catalog"
        );
        Ok(catalog)
    }

    /// Loads a catalog from any CSV source with a header row.
    pub fn read<R: Read>(&self, source: R) -> Result<Catalog, CatalogError> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(source);
        let layout = Layout::resolve(reader.headers()?, &self.columns)?;

        let mut groups: Vec<Group> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for record in reader.records() {
            let record = record?;
            let line = record.position().map_or(0, |p| p.line());
            let row_err = |message: String| CatalogError::Row { line, message };

            let group = field(&record, layout.group);
            if self.columns.excluded_group.as_deref() == Some(group) {
                continue;
            }
            if group.is_empty() {
                return Err(row_err("empty group identifier".into()));
            }

            let score = parse_number(field(&record, layout.score))
                .map_err(|e| row_err(format!("score: {e}")))?;

            let mut sessions = Vec::new();
            for (days_idx, hours_idx, location) in &layout.schedules {
                let days = field(&record, *days_idx);
                let hours = field(&record, *hours_idx);
                sessions.extend(parse_sessions(days, hours, *location).map_err(row_err)?);
            }

            let option = SectionOption::new(
                format!(
                    "{} ({})",
                    field(&record, layout.subject),
                    field(&record, layout.instructor)
                ),
                sessions,
                score,
            );

            let slot = *index.entry(group.to_string()).or_insert_with(|| {
                groups.push(Group::new(group, Vec::new()));
                groups.len() - 1
            });
            groups[slot].options.push(option);
        }

        for g in &groups {
            debug!(group = %g.name, options = g.options.len(), "catalog group");
        }
        Ok(Catalog::new(groups))
    }
}

/// Loads a catalog file with the default column layout.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
    CatalogReader::default().read_path(path)
}

/// Column indices resolved against the header row.
struct Layout {
    group: usize,
    subject: usize,
    instructor: usize,
    score: usize,
    schedules: Vec<(usize, usize, Location)>,
}

impl Layout {
    fn resolve(headers: &StringRecord, columns: &CatalogColumns) -> Result<Self, CatalogError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| CatalogError::MissingColumn(name.to_string()))
        };
        let group = find(&columns.group)?;
        let subject = find(&columns.subject)?;
        let instructor = find(&columns.instructor)?;
        let score = find(&columns.score)?;
        let schedules = columns
            .schedules
            .iter()
            .map(|s| Ok((find(&s.days)?, find(&s.hours)?, s.location)))
            .collect::<Result<Vec<_>, CatalogError>>()?;
        Ok(Self {
            group,
            subject,
            instructor,
            score,
            schedules,
        })
    }
}

fn field(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or("")
}

/// Expands one day/hour pair into sessions.
///
/// Both fields empty yields no sessions; exactly one empty is an error.
pub fn parse_sessions(days: &str, hours: &str, location: Location) -> Result<Vec<Session>, String> {
    let day_list = parse_days(days)?;
    let range = parse_hours(hours)?;
    match (day_list.is_empty(), range) {
        (true, None) => Ok(Vec::new()),
        (false, Some((start, end))) => Ok(day_list
            .into_iter()
            .map(|day| Session::new(day, start, end, location))
            .collect()),
        _ => Err(format!(
            "days '{}' and hours '{}' disagree for {location}",
            days.trim(),
            hours.trim()
        )),
    }
}

/// Parses `"Lu/Mi/Vi"` into days. Empty input yields no days.
pub fn parse_days(s: &str) -> Result<Vec<DayOfWeek>, String> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(Vec::new());
    }
    s.split('/')
        .map(|d| {
            let d = d.trim();
            DayOfWeek::from_abbrev(d).ok_or_else(|| format!("unknown day '{d}'"))
        })
        .collect()
}

/// Parses `"8 a 10.5"` into `(8.0, 10.5)`. Empty input yields `None`.
pub fn parse_hours(s: &str) -> Result<Option<(f64, f64)>, String> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    let Some((start, end)) = s.split_once(" a ") else {
        return Err(format!("hour range '{s}' is not '<start> a <end>'"));
    };
    let start = parse_number(start)?;
    let end = parse_number(end)?;
    if !(0.0..=24.0).contains(&start) || !(0.0..=24.0).contains(&end) {
        return Err(format!("hour range '{s}' is outside 0 to 24"));
    }
    if start >= end {
        return Err(format!("hour range '{s}' does not end after it starts"));
    }
    Ok(Some((start, end)))
}

/// Parses a decimal number, accepting `,` as the decimal separator.
fn parse_number(s: &str) -> Result<f64, String> {
    let normalized = s.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(format!("'{s}' is not a number")),
    }
}
