//! # bikram-sambat
//!
//! The Bikram Sambat calendar as a `chronology-core` chronology.
//!
//! Instances are obtained from a [`ChronologyRegistry`], which hands out one
//! shared, immutable [`BikramSambatChronology`] per zone and week
//! configuration. The free functions below use the process-wide registry.
//!
//! ```no_run
//! use bikram_sambat::{get_instance_in, Chronology, FieldType};
//!
//! let bs = get_instance_in(chrono_tz::Asia::Kathmandu);
//! let year = bs.get(FieldType::Year, 1_700_000_000_000)?;
//! # Ok::<(), bikram_sambat::ChronologyError>(())
//! ```
//!
//! ## Modules
//!
//! - [`engine`] — year starts, leap predicates, bounds, month shape
//! - [`rule`] — pluggable leap-year rules and the JSON leap table
//! - [`assemble`] — installs the calendar's era, year and month fields
//! - [`chronology`] — the `BikramSambatChronology` handle
//! - [`registry`] — per-key instance cache and serde identity
//! - [`config`] — default zone from the environment
//! - [`error`] — Error types

pub mod assemble;
pub mod chronology;
pub mod config;
pub mod engine;
pub mod error;
pub mod registry;
pub mod rule;

pub use chronology::{Base, BikramSambatChronology, CivilDate};
pub use engine::CalendarEngine;
pub use error::{CalendarError, Result};
pub use registry::{
    get_instance, get_instance_in, get_instance_utc, get_instance_with, ChronologyKey,
    ChronologyRegistry,
};
pub use rule::{LeapYearRule, LeapYearTable, ProvisionalLeapRule};

pub use chronology_core::{
    CalendarHooks, Chronology, ChronologyError, DurationField, FieldType, Instant,
};

/// Week configuration used when none is given, as in ISO-8601.
pub const DEFAULT_MIN_DAYS_IN_FIRST_WEEK: u8 = 4;
