//! The two seams of the framework: calendar arithmetic hooks and the
//! chronology surface that decorators layer over.

use std::fmt;

use chrono_tz::Tz;

use crate::error::Result;
use crate::field::{DurationField, FieldType, Fields};
use crate::Instant;

/// Arithmetic hooks a concrete calendar supplies to the generic decomposition.
///
/// All year arguments use the internal, zero-inclusive numbering: year `0`
/// is the year before year `1`. Every hook must be total over
/// `[min_year(), max_year()]`; calls outside that range are a caller error and
/// are prevented by bound decoration, not checked here.
pub trait CalendarHooks: fmt::Debug + Send + Sync {
    /// Whether `year` carries the intercalary day.
    fn is_leap_year(&self, year: i32) -> bool;

    /// Whether the day containing `instant` is the calendar's leap day.
    fn is_leap_day(&self, instant: Instant) -> bool;

    /// The instant at the first moment of `year`. Strictly increasing in `year`.
    fn year_start_instant(&self, year: i32) -> Instant;

    fn min_year(&self) -> i32;

    fn max_year(&self) -> i32;

    /// Approximate instant of the calendar's epoch, halved. Used to seed the
    /// year estimate; must be within about half a year.
    fn approx_epoch_midpoint(&self) -> Instant;

    /// Average length of a year in milliseconds, halved.
    fn average_millis_per_year_divided_by_two(&self) -> i64;

    /// Number of month slots in every year.
    fn months_per_year(&self) -> u32;

    fn days_in_year(&self, year: i32) -> u32;

    fn days_in_year_month(&self, year: i32, month: u32) -> u32;

    /// Substitute calendar-specific fields into a base field set.
    fn assemble_fields(&self, fields: Fields) -> Fields;
}

/// A calendar system bound to a zone, with fields and composition.
///
/// Implemented by concrete chronologies and by the decorators in
/// [`crate::limit`] and [`crate::zoned`], which wrap another `Chronology`.
pub trait Chronology: fmt::Debug + Send + Sync {
    fn zone(&self) -> Tz;

    fn fields(&self) -> &Fields;

    /// Instant for the given external (skip-zero) year, month, day and
    /// millisecond of day, interpreted in this chronology's zone.
    fn date_time_millis(
        &self,
        year: i32,
        month: u32,
        day: u32,
        millis_of_day: i64,
    ) -> Result<Instant>;

    fn get(&self, field: FieldType, instant: Instant) -> Result<i32>;

    fn set(&self, field: FieldType, instant: Instant, value: i32) -> Result<Instant>;

    fn add(&self, duration: DurationField, instant: Instant, amount: i64) -> Result<Instant>;

    /// Text rendering of a field value; numeric unless the field has labels.
    fn as_text(&self, field: FieldType, instant: Instant) -> Result<String>;
}
