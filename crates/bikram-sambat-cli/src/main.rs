//! `bs` CLI — Bikram Sambat year starts, leap years and instant decomposition.
//!
//! ## Usage
//!
//! ```sh
//! # Instant (ms since 1970-01-01Z) at which year 2081 begins
//! bs year-start 2081
//!
//! # Calendar fields of an instant in Kathmandu
//! bs decompose 1700000000000 --zone Asia/Kathmandu
//!
//! # Same, as JSON
//! bs decompose 1700000000000 --zone Asia/Kathmandu --json
//!
//! # Leap year check against a published leap table
//! bs --leap-table leap_years.json leap 2081
//! ```

mod logging;

use std::sync::Arc;

use anyhow::{Context, Result};
use bikram_sambat::config;
use bikram_sambat::{CalendarHooks, Chronology, ChronologyRegistry, CivilDate, LeapYearTable};
use chrono::{DateTime, SecondsFormat, Utc};
use chronology_core::MILLIS_PER_SECOND;
use clap::{Parser, Subcommand};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "bs", version, about = "Bikram Sambat calendar CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON leap-year table ({"leap_years": [...]}) to use instead of the
    /// provisional quadrennial rule
    #[arg(long, global = true)]
    leap_table: Option<String>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the instant at which a year begins (UTC)
    YearStart {
        /// Year, from 1 onwards
        #[arg(allow_negative_numbers = true)]
        year: i32,
    },
    /// Print the calendar fields of an instant
    Decompose {
        /// Milliseconds since 1970-01-01T00:00:00Z
        #[arg(allow_negative_numbers = true)]
        instant: i64,
        /// IANA zone name (defaults to $TZ, then UTC)
        #[arg(long)]
        zone: Option<String>,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Report whether a year is a leap year
    Leap {
        /// Year; negative years precede year 1, there is no year 0
        #[arg(allow_negative_numbers = true)]
        year: i32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let registry = build_registry(cli.leap_table.as_deref())?;

    match cli.command {
        Commands::YearStart { year } => {
            let bs = registry.get_instance_utc();
            let instant = bs
                .date_time_millis(year, 1, 1, 0)
                .with_context(|| format!("Failed to compute start of year {}", year))?;
            println!("{}", instant);
            if let Some(utc) = DateTime::<Utc>::from_timestamp_millis(instant) {
                println!("{}", utc.to_rfc3339_opts(SecondsFormat::Millis, true));
            }
        }
        Commands::Decompose {
            instant,
            zone,
            json,
        } => {
            let zone = match zone.as_deref() {
                Some(name) => config::parse_zone(name)?,
                None => config::default_zone(),
            };
            let bs = registry.get_instance_in(zone);
            info!(%bs, instant, "decomposing");
            let date = bs
                .decompose(instant)
                .with_context(|| format!("Failed to decompose instant {}", instant))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&date)?);
            } else {
                print!("{}", render_civil_date(&date));
            }
        }
        Commands::Leap { year } => {
            let internal = chronology_core::skip::to_internal("year", year)?;
            let leap = registry.engine().is_leap_year(internal);
            println!(
                "{} is a {} year",
                year,
                if leap { "leap" } else { "common" }
            );
        }
    }

    Ok(())
}

/// The process-wide registry, or a fresh one over the given leap table.
fn build_registry(leap_table: Option<&str>) -> Result<ChronologyRegistry> {
    match leap_table {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read file: {}", path))?;
            let table = LeapYearTable::from_json(&json)
                .with_context(|| format!("Failed to load leap table: {}", path))?;
            debug!(path, leap_years = table.leap_years().count(), "loaded leap table");
            Ok(ChronologyRegistry::new(Arc::new(table)))
        }
        None => Ok(ChronologyRegistry::global().clone()),
    }
}

fn render_civil_date(date: &CivilDate) -> String {
    let seconds = date.millis_of_day / MILLIS_PER_SECOND;
    format!(
        "era:          {}\n\
         year:         {}\n\
         month:        {}\n\
         day:          {}\n\
         day of year:  {}\n\
         weekyear:     {}\n\
         time:         {:02}:{:02}:{:02}.{:03}\n\
         leap day:     {}\n",
        date.era,
        date.year,
        date.month,
        date.day,
        date.day_of_year,
        date.weekyear,
        seconds / 3600,
        seconds / 60 % 60,
        seconds % 60,
        date.millis_of_day % MILLIS_PER_SECOND,
        if date.leap_day { "yes" } else { "no" },
    )
}
