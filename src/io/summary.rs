//! Console summary of a selection result.

use std::fmt;

use crate::model::{Catalog, Session};
use crate::selector::SelectionResult;

/// Human-readable report of a [`SelectionResult`].
///
/// ```text
/// Searched 48 candidates (48 scored, 0 pruned, 12 feasible) in 0 ms
///
/// #1  utility 17.497  (score 17.500, 3 commutes)
///     1: Algebra (Ruiz)          Mon 08:00-10:00 Economics, Wed 08:00-10:00 Economics
///     2: Historia (Gil)          Wed 18:00-20:00 Remote
/// ```
pub struct Summary<'a> {
    result: &'a SelectionResult,
    catalog: &'a Catalog,
}

impl<'a> Summary<'a> {
    pub fn new(result: &'a SelectionResult, catalog: &'a Catalog) -> Self {
        Self { result, catalog }
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.result;
        writeln!(
            f,
            "Searched {} candidates ({} scored, {} pruned, {} feasible) in {} ms",
            r.space_size, r.evaluated, r.pruned, r.feasible, r.elapsed_ms
        )?;
        if r.cancelled {
            writeln!(f, "Search cancelled; showing the best timetables found so far.")?;
        }

        if !r.is_feasible_found() {
            return writeln!(f, "No feasible timetable found: every combination has an overlap.");
        }

        let width = self
            .catalog
            .groups
            .iter()
            .flat_map(|g| g.options.iter().map(|o| o.id.chars().count()))
            .max()
            .unwrap_or(0);

        for (rank, ranked) in r.ranked.iter().enumerate() {
            writeln!(f)?;
            writeln!(
                f,
                "#{}  utility {:.3}  (score {:.3}, {} commute{})",
                rank + 1,
                ranked.utility(),
                ranked.evaluation.base_score,
                ranked.evaluation.commute_count,
                if ranked.evaluation.commute_count == 1 { "" } else { "s" }
            )?;
            for (group, option) in self.catalog.groups.iter().zip(ranked.options(&self.catalog.groups)) {
                let sessions: Vec<String> = option.sessions.iter().map(format_session).collect();
                writeln!(
                    f,
                    "    {}: {:<width$}  {}",
                    group.name,
                    option.id,
                    sessions.join(", "),
                    width = width
                )?;
            }
        }
        Ok(())
    }
}

/// `Mon 08:30-10:00 Economics`
pub fn format_session(session: &Session) -> String {
    let day = session.day.to_string();
    format!(
        "{} {}-{} {}",
        &day[..3],
        format_hour(session.start),
        format_hour(session.end),
        session.location
    )
}

/// Formats a real hour as `HH:MM`, rounding to the nearest minute.
pub fn format_hour(hour: f64) -> String {
    let minutes = (hour * 60.0).round() as i64;
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
