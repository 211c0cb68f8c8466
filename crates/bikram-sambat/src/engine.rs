//! Bikram Sambat calendar arithmetic.
//!
//! The year-start formula and its constants are inherited from a fixed-month
//! calendar with a quadrennial leap cycle anchored at 1963. They give a
//! consistent, strictly increasing year axis but are not the administrative
//! Bikram Sambat epoch; correct constants slot into the same shape.

use std::sync::Arc;

use chronology_core::{Basic, CalendarHooks, Fields, Instant, MILLIS_PER_DAY};

use crate::assemble;
use crate::rule::{LeapYearRule, ProvisionalLeapRule};

/// The lowest year whose start is representable in millisecond `i64`s.
pub const MIN_YEAR: i32 = -292_269_054;

/// The highest year whose start is representable in millisecond `i64`s.
pub const MAX_YEAR: i32 = 292_272_984;

/// Average year of the quadrennial cycle, 365.25 days.
pub const MILLIS_PER_YEAR: i64 = 31_557_600_000;

/// Day of month that marks the leap day in a leap year.
pub const LEAP_DAY_OF_MONTH: u32 = 6;

/// Month slots per year. The calendar is documented with twelve months; the
/// thirteenth slot carries the remainder days of the provisional month shape.
pub const MONTHS_PER_YEAR: u32 = 13;

const REFERENCE_YEAR: i32 = 1963;
const EPOCH_OFFSET_DAYS: i64 = 365 - 112;
const DAYS_IN_REGULAR_MONTH: u32 = 30;

/// Pure calendar hooks over an injected leap-year rule.
#[derive(Debug, Clone)]
pub struct CalendarEngine {
    rule: Arc<dyn LeapYearRule>,
}

impl Default for CalendarEngine {
    fn default() -> Self {
        Self::new(Arc::new(ProvisionalLeapRule))
    }
}

impl CalendarEngine {
    pub fn new(rule: Arc<dyn LeapYearRule>) -> Self {
        Self { rule }
    }

    pub fn rule(&self) -> &Arc<dyn LeapYearRule> {
        &self.rule
    }

    /// Whether both engines consult the same rule object.
    pub fn same_rule(&self, other: &CalendarEngine) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.rule), Arc::as_ptr(&other.rule))
    }

    /// Days from 1970-01-01 to the first day of `year`.
    fn year_start_day(&self, year: i32) -> i64 {
        let relative_year = i64::from(year) - i64::from(REFERENCE_YEAR);
        let leap_years = if relative_year <= 0 {
            // Offset before shifting so the shift floors negative values.
            (relative_year + 3) >> 2
        } else {
            let mut count = relative_year >> 2;
            // The reference point falls after the leap day of the cycle, so
            // non-leap years still owe the day from the preceding leap year.
            if !self.is_leap_year(year) {
                count += 1;
            }
            count
        };
        relative_year * 365 + leap_years + EPOCH_OFFSET_DAYS
    }
}

impl CalendarHooks for CalendarEngine {
    fn is_leap_year(&self, year: i32) -> bool {
        self.rule.is_leap_year(year)
    }

    fn is_leap_day(&self, instant: Instant) -> bool {
        let basic = Basic::new(self, crate::DEFAULT_MIN_DAYS_IN_FIRST_WEEK);
        basic.day_of_month(instant) == LEAP_DAY_OF_MONTH
            && self.is_leap_year(basic.year(instant))
    }

    fn year_start_instant(&self, year: i32) -> Instant {
        self.year_start_day(year) * MILLIS_PER_DAY
    }

    fn min_year(&self) -> i32 {
        MIN_YEAR
    }

    fn max_year(&self) -> i32 {
        MAX_YEAR
    }

    fn approx_epoch_midpoint(&self) -> Instant {
        (1962 * MILLIS_PER_YEAR + 112 * MILLIS_PER_DAY) / 2
    }

    fn average_millis_per_year_divided_by_two(&self) -> i64 {
        MILLIS_PER_YEAR / 2
    }

    fn months_per_year(&self) -> u32 {
        MONTHS_PER_YEAR
    }

    fn days_in_year(&self, year: i32) -> u32 {
        (self.year_start_day(year + 1) - self.year_start_day(year)) as u32
    }

    fn days_in_year_month(&self, year: i32, month: u32) -> u32 {
        if month < MONTHS_PER_YEAR {
            DAYS_IN_REGULAR_MONTH
        } else {
            self.days_in_year(year) - DAYS_IN_REGULAR_MONTH * (MONTHS_PER_YEAR - 1)
        }
    }

    fn assemble_fields(&self, fields: Fields) -> Fields {
        assemble::install_calendar_fields(fields)
    }
}
