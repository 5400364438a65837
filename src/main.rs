//! Timetable selector CLI.
//!
//! Loads a course catalog from CSV, searches every combination of one
//! section per group and prints the best timetables. Optionally exports
//! each of them as an iCalendar file.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use u_timetable::io::{load_catalog, next_monday, CalendarConfig, CalendarExporter, Summary};
use u_timetable::selector::{
    SearchObserver, SearchStrategy, SelectionResult, SelectorConfig, SelectorRunner,
};

#[derive(Parser)]
#[command(name = "u-timetable")]
#[command(about = "Pick the best weekly timetable from a course catalog")]
struct Cli {
    /// Course catalog (CSV)
    #[arg(short, long, env = "TIMETABLE_INPUT", default_value = "oferta.csv")]
    input: PathBuf,

    /// Utility subtracted per trip to an in-person session
    #[arg(long, env = "TIMETABLE_COMMUTE_PENALTY", default_value = "0.001")]
    commute_penalty: f64,

    /// Number of timetables to report
    #[arg(short = 'n', long, default_value = "1")]
    top: usize,

    /// Search strategy
    #[arg(short, long, value_enum, default_value = "exhaustive")]
    strategy: StrategyArg,

    /// Spread the search over all cores (requires the `parallel` feature)
    #[arg(long)]
    parallel: bool,

    /// Write one `.ics` file per reported timetable into this directory
    #[arg(long, env = "TIMETABLE_CALENDAR_DIR")]
    calendar_dir: Option<PathBuf>,

    /// Monday of the first week of classes (YYYY-MM-DD). Defaults to the next Monday.
    #[arg(long)]
    week_start: Option<NaiveDate>,

    /// Number of weekly occurrences in the calendar
    #[arg(long, default_value = "16")]
    weeks: u32,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Exhaustive,
    Pruned,
}

impl From<StrategyArg> for SearchStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Exhaustive => SearchStrategy::Exhaustive,
            StrategyArg::Pruned => SearchStrategy::Pruned,
        }
    }
}

/// Logs search progress as a percentage of the candidate space.
struct LogProgress;

impl SearchObserver for LogProgress {
    fn on_start(&self, space_size: u64) {
        info!(candidates = space_size, "search started");
    }

    fn on_progress(&self, processed: u64, space_size: u64) {
        let percent = if space_size == 0 {
            100.0
        } else {
            processed as f64 * 100.0 / space_size as f64
        };
        info!(processed, "{percent:.1}% of candidates processed");
    }

    fn on_finish(&self, result: &SelectionResult) {
        if result.cancelled {
            warn!("search cancelled before completion");
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let catalog = load_catalog(&cli.input)
        .with_context(|| format!("loading catalog from {}", cli.input.display()))?;
    info!(
        groups = catalog.len(),
        options = catalog.option_count(),
        "catalog loaded"
    );

    let config = SelectorConfig::default()
        .with_top_n(cli.top)
        .with_commute_penalty(cli.commute_penalty)
        .with_strategy(cli.strategy.into())
        .with_parallel(cli.parallel);

    let result = SelectorRunner::run_observed(&catalog, &config, &LogProgress, None)
        .context("timetable search failed")?;

    print!("{}", Summary::new(&result, &catalog));

    if let Some(dir) = &cli.calendar_dir {
        let week_start = cli
            .week_start
            .unwrap_or_else(|| next_monday(Local::now().date_naive()));
        let exporter = CalendarExporter::new(CalendarConfig::new(week_start).with_weeks(cli.weeks))
            .context("invalid calendar settings")?;
        let written = exporter
            .write_ranked(dir, &result, &catalog)
            .context("exporting calendars")?;
        for path in &written {
            println!("Calendar written to {}", path.display());
        }
    }

    if result.is_feasible_found() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(2))
    }
}
