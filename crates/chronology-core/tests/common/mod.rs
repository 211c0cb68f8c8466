//! A thirteen-month test calendar anchored so that year 1970 starts at
//! instant 0. Months 1-12 have 30 days; month 13 has 5 days, or 6 in years
//! divisible by four.

#![allow(dead_code)]

use chronology_core::{
    Basic, CalendarHooks, Chronology, DateTimeField, DurationField, FieldType, Fields, Instant,
    MonthOfYearField, Result, SingleEraField, SkipZeroField, MILLIS_PER_DAY,
};
use chrono_tz::Tz;

const MILLIS_PER_YEAR: i64 = 31_557_600_000;

#[derive(Debug, Default)]
pub struct TestCalendar;

impl TestCalendar {
    fn year_start_day(year: i32) -> i64 {
        let year = i64::from(year);
        365 * (year - 1970) + (year - 1).div_euclid(4) - 1969_i64.div_euclid(4)
    }
}

impl CalendarHooks for TestCalendar {
    fn is_leap_year(&self, year: i32) -> bool {
        year.rem_euclid(4) == 0
    }

    fn is_leap_day(&self, instant: Instant) -> bool {
        let basic = Basic::new(self, 4);
        basic.month_of_year(instant) == 13 && basic.day_of_month(instant) == 6
    }

    fn year_start_instant(&self, year: i32) -> Instant {
        Self::year_start_day(year) * MILLIS_PER_DAY
    }

    fn min_year(&self) -> i32 {
        -100_000
    }

    fn max_year(&self) -> i32 {
        100_000
    }

    fn approx_epoch_midpoint(&self) -> Instant {
        1970 * MILLIS_PER_YEAR / 2
    }

    fn average_millis_per_year_divided_by_two(&self) -> i64 {
        MILLIS_PER_YEAR / 2
    }

    fn months_per_year(&self) -> u32 {
        13
    }

    fn days_in_year(&self, year: i32) -> u32 {
        (Self::year_start_day(year + 1) - Self::year_start_day(year)) as u32
    }

    fn days_in_year_month(&self, year: i32, month: u32) -> u32 {
        if month < 13 {
            30
        } else {
            self.days_in_year(year) - 360
        }
    }

    fn assemble_fields(&self, fields: Fields) -> Fields {
        let month_of_year = MonthOfYearField::new(13);
        Fields {
            era: Box::new(SingleEraField::new("TC")),
            year: Box::new(SkipZeroField::new(fields.year)),
            weekyear: Box::new(SkipZeroField::new(fields.weekyear)),
            months: month_of_year.duration_field(),
            month_of_year: Box::new(month_of_year),
        }
    }
}

/// Plain UTC chronology over [`TestCalendar`].
#[derive(Debug)]
pub struct TestChronology {
    calendar: TestCalendar,
    fields: Fields,
}

impl TestChronology {
    pub fn new() -> Self {
        let calendar = TestCalendar;
        let fields = calendar.assemble_fields(Fields::base());
        Self { calendar, fields }
    }

    pub fn basic(&self) -> Basic<'_> {
        Basic::new(&self.calendar, 4)
    }
}

impl Chronology for TestChronology {
    fn zone(&self) -> Tz {
        Tz::UTC
    }

    fn fields(&self) -> &Fields {
        &self.fields
    }

    fn date_time_millis(
        &self,
        year: i32,
        month: u32,
        day: u32,
        millis_of_day: i64,
    ) -> Result<Instant> {
        self.basic().date_time_millis(year, month, day, millis_of_day)
    }

    fn get(&self, field: FieldType, instant: Instant) -> Result<i32> {
        Ok(self.fields.field(field).get(&self.basic(), instant))
    }

    fn set(&self, field: FieldType, instant: Instant, value: i32) -> Result<Instant> {
        self.fields.field(field).set(&self.basic(), instant, value)
    }

    fn add(&self, duration: DurationField, instant: Instant, amount: i64) -> Result<Instant> {
        duration.add(&self.basic(), instant, amount)
    }

    fn as_text(&self, field: FieldType, instant: Instant) -> Result<String> {
        Ok(self.fields.field(field).as_text(&self.basic(), instant))
    }
}
