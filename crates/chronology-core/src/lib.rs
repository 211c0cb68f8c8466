//! # chronology-core
//!
//! A small chronology framework for calendars with well-defined year starts.
//!
//! A concrete calendar implements [`CalendarHooks`] (year starts, leap
//! predicates, bounds, month lengths). The framework turns those hooks into
//! field access through [`Basic`], supplies reusable field decorators, and
//! layers bound and timezone handling over any [`Chronology`].
//!
//! ## Modules
//!
//! - [`basic`] — generic instant ↔ year/month/day/week decomposition
//! - [`field`] — `DateTimeField` trait, `DurationField`, the base field set
//! - [`era`] — two-era and single-era fields
//! - [`skip`] — skip-zero numbering and its field decorator
//! - [`limit`] — `LimitChronology`, rejects instants outside a range
//! - [`zoned`] — `ZonedChronology`, applies `chrono-tz` offsets
//! - [`hooks`] — the `CalendarHooks` and `Chronology` traits
//! - [`error`] — Error types

pub mod basic;
pub mod era;
pub mod error;
pub mod field;
pub mod hooks;
pub mod limit;
pub mod skip;
pub mod zoned;

pub use basic::Basic;
pub use era::{SingleEraField, StandardEraField};
pub use error::{ChronologyError, Result};
pub use field::{DateTimeField, DurationField, FieldType, Fields, MonthOfYearField};
pub use hooks::{CalendarHooks, Chronology};
pub use limit::LimitChronology;
pub use skip::SkipZeroField;
pub use zoned::ZonedChronology;

/// Milliseconds since 1970-01-01T00:00:00Z.
pub type Instant = i64;

pub const MILLIS_PER_SECOND: i64 = 1_000;
pub const MILLIS_PER_DAY: i64 = 86_400_000;
pub const MILLIS_PER_WEEK: i64 = 7 * MILLIS_PER_DAY;
