//! iCalendar (RFC 5545) export of chosen timetables.
//!
//! Each session of a timetable becomes one weekly recurring `VEVENT`,
//! anchored in a representative week that starts on a Monday. Times are
//! written as floating local times so the calendar client keeps them on the
//! wall clock of whoever imports the file.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use tracing::debug;

use super::error::CalendarError;
use crate::model::{Catalog, SectionOption, Session};
use crate::selector::SelectionResult;

const PRODID: &str = "-//iyulab//u-timetable//EN";

/// Calendar export parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarConfig {
    /// Monday of the first week of classes.
    pub week_start: NaiveDate,
    /// Number of weekly occurrences of every session.
    pub weeks: u32,
}

impl CalendarConfig {
    /// Creates a configuration with a 16-week term.
    pub fn new(week_start: NaiveDate) -> Self {
        Self {
            week_start,
            weeks: 16,
        }
    }

    /// Sets the number of weekly occurrences.
    pub fn with_weeks(mut self, weeks: u32) -> Self {
        self.weeks = weeks;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), CalendarError> {
        if self.week_start.weekday() != Weekday::Mon {
            return Err(CalendarError::WeekStartNotMonday(self.week_start));
        }
        if self.weeks == 0 {
            return Err(CalendarError::ZeroWeeks);
        }
        Ok(())
    }
}

/// The Monday on or after `date`.
pub fn next_monday(date: NaiveDate) -> NaiveDate {
    let offset = (7 - date.weekday().num_days_from_monday()) % 7;
    date + Duration::days(offset as i64)
}

/// Renders and writes `.ics` files.
#[derive(Debug, Clone)]
pub struct CalendarExporter {
    config: CalendarConfig,
}

impl CalendarExporter {
    /// Creates an exporter, validating the configuration.
    pub fn new(config: CalendarConfig) -> Result<Self, CalendarError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Renders one timetable as an iCalendar document.
    ///
    /// `uid_prefix` keeps event UIDs distinct across files.
    pub fn render<'a, I>(&self, uid_prefix: &str, options: I) -> Result<String, CalendarError>
    where
        I: IntoIterator<Item = &'a SectionOption>,
    {
        let stamp = format_datetime(self.config.week_start.and_time(NaiveTime::MIN));
        let mut out = String::new();
        push_line(&mut out, "BEGIN:VCALENDAR");
        push_line(&mut out, "VERSION:2.0");
        push_line(&mut out, &format!("PRODID:{PRODID}"));
        push_line(&mut out, "CALSCALE:GREGORIAN");

        for (o, option) in options.into_iter().enumerate() {
            for (s, session) in option.sessions.iter().enumerate() {
                let (start, end) = self.place(session)?;
                push_line(&mut out, "BEGIN:VEVENT");
                push_line(&mut out, &format!("UID:{uid_prefix}-{o}-{s}@u-timetable"));
                push_line(&mut out, &format!("DTSTAMP:{stamp}"));
                push_line(&mut out, &format!("DTSTART:{}", format_datetime(start)));
                push_line(&mut out, &format!("DTEND:{}", format_datetime(end)));
                push_line(
                    &mut out,
                    &format!(
                        "RRULE:FREQ=WEEKLY;BYDAY={};COUNT={}",
                        session.day.ical_code(),
                        self.config.weeks
                    ),
                );
                push_line(&mut out, &format!("SUMMARY:{}", escape_text(&option.id)));
                push_line(&mut out, &format!("LOCATION:{}", session.location));
                push_line(&mut out, "END:VEVENT");
            }
        }

        push_line(&mut out, "END:VCALENDAR");
        Ok(out)
    }

    /// Writes one timetable to `path`.
    pub fn write<'a, I>(&self, path: &Path, uid_prefix: &str, options: I) -> Result<(), CalendarError>
    where
        I: IntoIterator<Item = &'a SectionOption>,
    {
        let ics = self.render(uid_prefix, options)?;
        fs::write(path, ics).map_err(|source| CalendarError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Writes every ranked timetable as `timetable-<rank>.ics` under `dir`.
    ///
    /// Returns the written paths, best first.
    pub fn write_ranked(
        &self,
        dir: &Path,
        result: &SelectionResult,
        catalog: &Catalog,
    ) -> Result<Vec<PathBuf>, CalendarError> {
        fs::create_dir_all(dir).map_err(|source| CalendarError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut written = Vec::with_capacity(result.ranked.len());
        for (rank, ranked) in result.ranked.iter().enumerate() {
            let path = dir.join(format!("timetable-{}.ics", rank + 1));
            let prefix = format!("rank{}", rank + 1);
            self.write(&path, &prefix, ranked.options(&catalog.groups))?;
            debug!(path = %path.display(), "wrote calendar");
            written.push(path);
        }
        Ok(written)
    }

    /// First occurrence of a session within the representative week.
    fn place(&self, session: &Session) -> Result<(NaiveDateTime, NaiveDateTime), CalendarError> {
        let day = self.config.week_start + Duration::days(session.day.index() as i64);
        let midnight = day.and_time(NaiveTime::MIN);
        Ok((
            midnight + hour_offset(session.start)?,
            midnight + hour_offset(session.end)?,
        ))
    }
}

fn hour_offset(hour: f64) -> Result<Duration, CalendarError> {
    if !(0.0..=24.0).contains(&hour) {
        return Err(CalendarError::HourOutOfRange(hour));
    }
    Ok(Duration::minutes((hour * 60.0).round() as i64))
}

fn format_datetime(dt: NaiveDateTime) -> String {
    dt.format("%Y%m%dT%H%M%S").to_string()
}

/// Escapes TEXT values (RFC 5545 §3.3.11).
fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

/// Appends a content line, folded at 75 octets, terminated by CRLF.
fn push_line(out: &mut String, line: &str) {
    let mut used = 0;
    for c in line.chars() {
        let len = c.len_utf8();
        if used + len > 75 {
            out.push_str("\r\n ");
            used = 1;
        }
        out.push(c);
        used += len;
    }
    out.push_str("\r\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DayOfWeek, Group, Location};
    use crate::selector::{SelectorConfig, SelectorRunner};

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn algebra() -> SectionOption {
        SectionOption::new(
            "Algebra (Ruiz, J.)",
            vec![
                Session::new(DayOfWeek::Monday, 8.0, 10.5, Location::Economics),
                Session::new(DayOfWeek::Thursday, 18.0, 20.0, Location::Remote),
            ],
            5.0,
        )
    }

    #[test]
    fn test_validate_week_start() {
        let tuesday = NaiveDate::from_ymd_opt(2026, 3, 3).unwrap();
        assert!(matches!(
            CalendarConfig::new(tuesday).validate(),
            Err(CalendarError::WeekStartNotMonday(_))
        ));
        assert!(matches!(
            CalendarConfig::new(monday()).with_weeks(0).validate(),
            Err(CalendarError::ZeroWeeks)
        ));
        assert!(CalendarConfig::new(monday()).validate().is_ok());
    }

    #[test]
    fn test_next_monday() {
        assert_eq!(next_monday(monday()), monday());
        let wednesday = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
        assert_eq!(next_monday(wednesday), NaiveDate::from_ymd_opt(2026, 3, 9).unwrap());
        let sunday = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();
        assert_eq!(next_monday(sunday), NaiveDate::from_ymd_opt(2026, 3, 9).unwrap());
    }

    #[test]
    fn test_render_one_event_per_session() {
        let exporter = CalendarExporter::new(CalendarConfig::new(monday()).with_weeks(12)).unwrap();
        let option = algebra();
        let ics = exporter.render("t", [&option]).unwrap();

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.ends_with("END:VCALENDAR\r\n"));
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 2);
        assert!(ics.contains("DTSTART:20260302T080000\r\n"));
        assert!(ics.contains("DTEND:20260302T103000\r\n"));
        assert!(ics.contains("DTSTART:20260305T180000\r\n"));
        assert!(ics.contains("RRULE:FREQ=WEEKLY;BYDAY=MO;COUNT=12\r\n"));
        assert!(ics.contains("RRULE:FREQ=WEEKLY;BYDAY=TH;COUNT=12\r\n"));
        assert!(ics.contains("SUMMARY:Algebra (Ruiz\\, J.)\r\n"));
        assert!(ics.contains("LOCATION:Remote\r\n"));
        assert!(ics.contains("UID:t-0-1@u-timetable\r\n"));
    }

    #[test]
    fn test_end_of_day_rolls_to_midnight() {
        let exporter = CalendarExporter::new(CalendarConfig::new(monday())).unwrap();
        let late = SectionOption::new(
            "Late",
            vec![Session::new(DayOfWeek::Saturday, 22.0, 24.0, Location::Law)],
            1.0,
        );
        let ics = exporter.render("t", [&late]).unwrap();
        assert!(ics.contains("DTEND:20260308T000000\r\n"));
    }

    #[test]
    fn test_long_lines_folded() {
        let mut out = String::new();
        let long = format!("SUMMARY:{}", "x".repeat(200));
        push_line(&mut out, &long);
        for line in out.split("\r\n") {
            assert!(line.len() <= 75, "line too long: {}", line.len());
        }
        assert_eq!(out.replace("\r\n ", ""), format!("{long}\r\n"));
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a;b,c\\d\ne"), "a\\;b\\,c\\\\d\\ne");
    }

    #[test]
    fn test_write_ranked() {
        let catalog = Catalog::new(vec![Group::new("1", vec![algebra()])]);
        let result = SelectorRunner::run(&catalog, &SelectorConfig::default()).unwrap();
        let dir = std::env::temp_dir().join(format!("u-timetable-test-{}", std::process::id()));
        let exporter = CalendarExporter::new(CalendarConfig::new(monday())).unwrap();

        let written = exporter.write_ranked(&dir, &result, &catalog).unwrap();
        assert_eq!(written, vec![dir.join("timetable-1.ics")]);
        let content = fs::read_to_string(&written[0]).unwrap();
        assert_eq!(content.matches("BEGIN:VEVENT").count(), 2);

        fs::remove_dir_all(&dir).unwrap();
    }
}
