//! Day, location and session value types.

use std::fmt;

/// Teaching day. Sunday is never scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    /// Number of schedulable days.
    pub const COUNT: usize = 6;

    /// All days in calendar order.
    pub const ALL: [DayOfWeek; Self::COUNT] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    /// Position of this day within [`ALL`](Self::ALL), also its offset in
    /// days from Monday.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Parses the two-letter abbreviation used in course catalogs
    /// (`Lu`, `Ma`, `Mi`, `Ju`, `Vi`, `Sa`).
    pub fn from_abbrev(s: &str) -> Option<Self> {
        match s {
            "Lu" => Some(DayOfWeek::Monday),
            "Ma" => Some(DayOfWeek::Tuesday),
            "Mi" => Some(DayOfWeek::Wednesday),
            "Ju" => Some(DayOfWeek::Thursday),
            "Vi" => Some(DayOfWeek::Friday),
            "Sa" => Some(DayOfWeek::Saturday),
            _ => None,
        }
    }

    /// Two-letter iCalendar day code (`MO`, `TU`, ...).
    pub fn ical_code(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "MO",
            DayOfWeek::Tuesday => "TU",
            DayOfWeek::Wednesday => "WE",
            DayOfWeek::Thursday => "TH",
            DayOfWeek::Friday => "FR",
            DayOfWeek::Saturday => "SA",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
        };
        f.write_str(name)
    }
}

/// Physical site where a session is taught, or remote.
///
/// Each non-remote session costs a commute unless it directly follows
/// another one at the same site; remote sessions never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Location {
    /// School of Economics building.
    Economics,
    /// School of Law building.
    Law,
    /// Online attendance.
    Remote,
}

impl Location {
    /// Whether attending requires no travel.
    pub fn is_remote(self) -> bool {
        matches!(self, Location::Remote)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Location::Economics => "Economics",
            Location::Law => "Law",
            Location::Remote => "Remote",
        };
        f.write_str(name)
    }
}

/// One recurring weekly time block.
///
/// Hours are real numbers on a 24-hour clock (`8.5` is 08:30).
/// A well-formed session has `start < end`; the catalog loader rejects
/// anything else before the search sees it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Session {
    /// Day the block repeats on.
    pub day: DayOfWeek,
    /// Start hour (inclusive).
    pub start: f64,
    /// End hour (exclusive).
    pub end: f64,
    /// Where the block is taught.
    pub location: Location,
}

impl Session {
    /// Creates a new session.
    pub fn new(day: DayOfWeek, start: f64, end: f64, location: Location) -> Self {
        Self {
            day,
            start,
            end,
            location,
        }
    }

    /// Duration in hours.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether both hours are finite and `start < end`.
    pub fn is_well_formed(&self) -> bool {
        self.start.is_finite() && self.end.is_finite() && self.start < self.end
    }

    /// Whether the two sessions share any portion of time on the same day.
    ///
    /// Intervals are half-open: `[7, 8.5)` and `[8.5, 10)` do not overlap.
    pub fn overlaps(&self, other: &Session) -> bool {
        self.day == other.day && self.start < other.end && other.start < self.end
    }

    /// Whether `next` starts exactly when this session ends, at the same site.
    pub fn is_contiguous_with(&self, next: &Session) -> bool {
        self.end == next.start && self.location == next.location
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_order_and_index() {
        for (i, day) in DayOfWeek::ALL.iter().enumerate() {
            assert_eq!(day.index(), i);
        }
        assert!(DayOfWeek::Monday < DayOfWeek::Saturday);
    }

    #[test]
    fn test_day_from_abbrev() {
        assert_eq!(DayOfWeek::from_abbrev("Lu"), Some(DayOfWeek::Monday));
        assert_eq!(DayOfWeek::from_abbrev("Mi"), Some(DayOfWeek::Wednesday));
        assert_eq!(DayOfWeek::from_abbrev("Sa"), Some(DayOfWeek::Saturday));
        assert_eq!(DayOfWeek::from_abbrev("Do"), None);
        assert_eq!(DayOfWeek::from_abbrev("lu"), None);
    }

    #[test]
    fn test_touching_sessions_do_not_overlap() {
        let a = Session::new(DayOfWeek::Monday, 7.0, 8.5, Location::Economics);
        let b = Session::new(DayOfWeek::Monday, 8.5, 10.0, Location::Economics);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
        assert!(a.is_contiguous_with(&b));
    }

    #[test]
    fn test_overlap_requires_same_day() {
        let a = Session::new(DayOfWeek::Monday, 8.0, 10.0, Location::Law);
        let b = Session::new(DayOfWeek::Tuesday, 9.0, 11.0, Location::Law);
        assert!(!a.overlaps(&b));
        let c = Session::new(DayOfWeek::Monday, 9.0, 11.0, Location::Law);
        assert!(a.overlaps(&c));
    }

    #[test]
    fn test_contiguity_requires_same_location() {
        let a = Session::new(DayOfWeek::Friday, 8.0, 10.0, Location::Law);
        let b = Session::new(DayOfWeek::Friday, 10.0, 12.0, Location::Economics);
        assert!(!a.is_contiguous_with(&b));
    }

    #[test]
    fn test_well_formed() {
        assert!(Session::new(DayOfWeek::Monday, 8.0, 9.0, Location::Remote).is_well_formed());
        assert!(!Session::new(DayOfWeek::Monday, 9.0, 9.0, Location::Remote).is_well_formed());
        assert!(!Session::new(DayOfWeek::Monday, 9.0, 8.0, Location::Remote).is_well_formed());
        assert!(!Session::new(DayOfWeek::Monday, f64::NAN, 8.0, Location::Remote).is_well_formed());
    }

    #[test]
    fn test_remote() {
        assert!(Location::Remote.is_remote());
        assert!(!Location::Law.is_remote());
        assert!(!Location::Economics.is_remote());
    }
}
