//! Field and duration abstractions, and the generic base field set.

use std::fmt;

use crate::basic::Basic;
use crate::era::StandardEraField;
use crate::error::{verify_value_bounds, ChronologyError, Result};
use crate::{Instant, MILLIS_PER_DAY};

/// The fields a chronology assembles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Era,
    Year,
    Weekyear,
    MonthOfYear,
}

impl FieldType {
    pub fn name(self) -> &'static str {
        match self {
            FieldType::Era => "era",
            FieldType::Year => "year",
            FieldType::Weekyear => "weekyear",
            FieldType::MonthOfYear => "monthOfYear",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A unit of calendar measurement that amounts can be added in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationField {
    Eras,
    Years,
    Weekyears,
    /// Months of a calendar with `per_year` month slots.
    Months { per_year: u32 },
    Days,
}

impl DurationField {
    pub fn name(self) -> &'static str {
        match self {
            DurationField::Eras => "eras",
            DurationField::Years => "years",
            DurationField::Weekyears => "weekyears",
            DurationField::Months { .. } => "months",
            DurationField::Days => "days",
        }
    }

    /// Add `amount` units to `instant`.
    pub fn add(self, basic: &Basic<'_>, instant: Instant, amount: i64) -> Result<Instant> {
        if amount == 0 {
            return Ok(instant);
        }
        let overflow = ChronologyError::Overflow {
            unit: self.name(),
            amount,
        };
        match self {
            DurationField::Eras => Err(ChronologyError::UnsupportedDuration(self.name())),
            DurationField::Years => {
                let year = offset_year(basic.year(instant), amount).ok_or(overflow)?;
                basic.set_year(instant, year)
            }
            DurationField::Weekyears => {
                let weekyear = offset_year(basic.weekyear(instant), amount).ok_or(overflow)?;
                basic.set_weekyear(instant, weekyear)
            }
            DurationField::Months { per_year } => basic.add_months(instant, amount, per_year),
            DurationField::Days => amount
                .checked_mul(MILLIS_PER_DAY)
                .and_then(|delta| instant.checked_add(delta))
                .ok_or(overflow),
        }
    }
}

fn offset_year(year: i32, amount: i64) -> Option<i32> {
    i64::from(year)
        .checked_add(amount)
        .and_then(|y| i32::try_from(y).ok())
}

/// A calendar field: reads and writes one component of an instant.
///
/// Fields hold no reference to their chronology; the decomposition context
/// is passed in on every call.
pub trait DateTimeField: fmt::Debug + Send + Sync {
    fn field_type(&self) -> FieldType;

    fn get(&self, basic: &Basic<'_>, instant: Instant) -> i32;

    fn set(&self, basic: &Basic<'_>, instant: Instant, value: i32) -> Result<Instant>;

    fn minimum_value(&self, basic: &Basic<'_>) -> i32;

    fn maximum_value(&self, basic: &Basic<'_>) -> i32;

    fn duration_field(&self) -> DurationField;

    fn is_leap(&self, _basic: &Basic<'_>, _instant: Instant) -> bool {
        false
    }

    fn as_text(&self, basic: &Basic<'_>, instant: Instant) -> String {
        self.get(basic, instant).to_string()
    }
}

/// The assembled field set of a chronology.
#[derive(Debug)]
pub struct Fields {
    pub era: Box<dyn DateTimeField>,
    pub year: Box<dyn DateTimeField>,
    pub weekyear: Box<dyn DateTimeField>,
    pub month_of_year: Box<dyn DateTimeField>,
    pub months: DurationField,
}

impl Fields {
    /// The generic field set: a two-era field, plain year fields and a
    /// twelve-month month-of-year field.
    pub fn base() -> Self {
        let month_of_year = MonthOfYearField::new(12);
        let months = month_of_year.duration_field();
        Self {
            era: Box::new(StandardEraField),
            year: Box::new(YearField),
            weekyear: Box::new(WeekyearField),
            month_of_year: Box::new(month_of_year),
            months,
        }
    }

    pub fn field(&self, field_type: FieldType) -> &dyn DateTimeField {
        match field_type {
            FieldType::Era => self.era.as_ref(),
            FieldType::Year => self.year.as_ref(),
            FieldType::Weekyear => self.weekyear.as_ref(),
            FieldType::MonthOfYear => self.month_of_year.as_ref(),
        }
    }
}

/// Internal (zero-inclusive) year.
#[derive(Debug, Clone, Copy, Default)]
pub struct YearField;

impl DateTimeField for YearField {
    fn field_type(&self) -> FieldType {
        FieldType::Year
    }

    fn get(&self, basic: &Basic<'_>, instant: Instant) -> i32 {
        basic.year(instant)
    }

    fn set(&self, basic: &Basic<'_>, instant: Instant, value: i32) -> Result<Instant> {
        basic.set_year(instant, value)
    }

    fn minimum_value(&self, basic: &Basic<'_>) -> i32 {
        basic.hooks().min_year()
    }

    fn maximum_value(&self, basic: &Basic<'_>) -> i32 {
        basic.hooks().max_year()
    }

    fn duration_field(&self) -> DurationField {
        DurationField::Years
    }

    fn is_leap(&self, basic: &Basic<'_>, instant: Instant) -> bool {
        basic.hooks().is_leap_year(basic.year(instant))
    }
}

/// Week-based year, per the chronology's `min_days_in_first_week`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekyearField;

impl DateTimeField for WeekyearField {
    fn field_type(&self) -> FieldType {
        FieldType::Weekyear
    }

    fn get(&self, basic: &Basic<'_>, instant: Instant) -> i32 {
        basic.weekyear(instant)
    }

    fn set(&self, basic: &Basic<'_>, instant: Instant, value: i32) -> Result<Instant> {
        basic.set_weekyear(instant, value)
    }

    fn minimum_value(&self, basic: &Basic<'_>) -> i32 {
        basic.hooks().min_year()
    }

    fn maximum_value(&self, basic: &Basic<'_>) -> i32 {
        basic.hooks().max_year()
    }

    fn duration_field(&self) -> DurationField {
        DurationField::Weekyears
    }

    fn is_leap(&self, basic: &Basic<'_>, instant: Instant) -> bool {
        basic.weeks_in_year(basic.weekyear(instant)) > 52
    }
}

/// Month of year for calendars whose month lengths vary by year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthOfYearField {
    months: u32,
}

impl MonthOfYearField {
    pub fn new(months: u32) -> Self {
        Self { months }
    }

    pub fn months(&self) -> u32 {
        self.months
    }
}

impl DateTimeField for MonthOfYearField {
    fn field_type(&self) -> FieldType {
        FieldType::MonthOfYear
    }

    fn get(&self, basic: &Basic<'_>, instant: Instant) -> i32 {
        basic.month_of_year(instant) as i32
    }

    fn set(&self, basic: &Basic<'_>, instant: Instant, value: i32) -> Result<Instant> {
        verify_value_bounds(
            FieldType::MonthOfYear.name(),
            i64::from(value),
            1,
            i64::from(self.months),
        )?;
        basic.set_month(instant, value as u32)
    }

    fn minimum_value(&self, _basic: &Basic<'_>) -> i32 {
        1
    }

    fn maximum_value(&self, _basic: &Basic<'_>) -> i32 {
        self.months as i32
    }

    fn duration_field(&self) -> DurationField {
        DurationField::Months {
            per_year: self.months,
        }
    }
}
