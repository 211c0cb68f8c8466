//! Generic instant ↔ field decomposition over any [`CalendarHooks`].
//!
//! The year is found by estimating from the average year length and then
//! correcting against the exact year start. Everything below the year
//! (day of year, month, day of month) is derived from the distance to that
//! year start, so a calendar only has to get `year_start_instant` and its
//! month lengths right.

use crate::error::{verify_value_bounds, ChronologyError, Result};
use crate::hooks::CalendarHooks;
use crate::skip;
use crate::{Instant, MILLIS_PER_DAY, MILLIS_PER_WEEK};

/// Decomposition context: calendar hooks plus the week-numbering config.
#[derive(Debug, Clone, Copy)]
pub struct Basic<'a> {
    hooks: &'a dyn CalendarHooks,
    min_days_in_first_week: u8,
}

impl<'a> Basic<'a> {
    pub fn new(hooks: &'a dyn CalendarHooks, min_days_in_first_week: u8) -> Self {
        Self {
            hooks,
            min_days_in_first_week,
        }
    }

    pub fn hooks(&self) -> &'a dyn CalendarHooks {
        self.hooks
    }

    pub fn min_days_in_first_week(&self) -> u8 {
        self.min_days_in_first_week
    }

    /// Internal (zero-inclusive) year containing `instant`.
    pub fn year(&self, instant: Instant) -> i32 {
        let unit = self.hooks.average_millis_per_year_divided_by_two();
        let mut i2 = (instant >> 1) + self.hooks.approx_epoch_midpoint();
        if i2 < 0 {
            i2 = i2 - unit + 1;
        }
        let mut year = (i2 / unit) as i32;

        let year_start = self.hooks.year_start_instant(year);
        let diff = instant - year_start;
        if diff < 0 {
            year -= 1;
        } else if diff >= MILLIS_PER_DAY * 365
            && year < self.hooks.max_year()
            && self.hooks.year_start_instant(year + 1) <= instant
        {
            year += 1;
        }
        year
    }

    /// 1-based day of year.
    pub fn day_of_year(&self, instant: Instant) -> u32 {
        self.day_of_year_in(instant, self.year(instant))
    }

    pub fn day_of_year_in(&self, instant: Instant, year: i32) -> u32 {
        let since_start = instant - self.hooks.year_start_instant(year);
        (since_start.div_euclid(MILLIS_PER_DAY) + 1) as u32
    }

    pub fn month_of_year(&self, instant: Instant) -> u32 {
        self.month_of_year_in(instant, self.year(instant))
    }

    pub fn month_of_year_in(&self, instant: Instant, year: i32) -> u32 {
        let mut remaining = self.day_of_year_in(instant, year);
        let months = self.hooks.months_per_year();
        for month in 1..months {
            let len = self.hooks.days_in_year_month(year, month);
            if remaining <= len {
                return month;
            }
            remaining -= len;
        }
        months
    }

    pub fn day_of_month(&self, instant: Instant) -> u32 {
        let year = self.year(instant);
        let month = self.month_of_year_in(instant, year);
        self.day_of_year_in(instant, year) - self.days_before_month(year, month)
    }

    pub fn millis_of_day(instant: Instant) -> i64 {
        instant.rem_euclid(MILLIS_PER_DAY)
    }

    /// ISO day of week, 1 (Monday) through 7 (Sunday). 1970-01-01 is a Thursday.
    pub fn day_of_week(instant: Instant) -> u32 {
        let days = instant.div_euclid(MILLIS_PER_DAY);
        1 + (days + 3).rem_euclid(7) as u32
    }

    /// Total days in the months preceding `month` of `year`.
    pub fn days_before_month(&self, year: i32, month: u32) -> u32 {
        (1..month)
            .map(|m| self.hooks.days_in_year_month(year, m))
            .sum()
    }

    /// Start of week 1 of `year`: the Monday of the first week holding at
    /// least `min_days_in_first_week` days of the year.
    pub fn first_week_of_year(&self, year: i32) -> Instant {
        let year_start = self.hooks.year_start_instant(year);
        let start_dow = i64::from(Self::day_of_week(year_start));
        let threshold = 8 - i64::from(self.min_days_in_first_week);
        if start_dow > threshold {
            year_start + (8 - start_dow) * MILLIS_PER_DAY
        } else {
            year_start - (start_dow - 1) * MILLIS_PER_DAY
        }
    }

    pub fn weeks_in_year(&self, year: i32) -> u32 {
        let this_year = self.first_week_of_year(year);
        let next_year = self.first_week_of_year(year + 1);
        ((next_year - this_year) / MILLIS_PER_WEEK) as u32
    }

    pub fn week_of_weekyear(&self, instant: Instant) -> u32 {
        let year = self.year(instant);
        let first = self.first_week_of_year(year);
        if instant < first {
            return self.weeks_in_year(year - 1);
        }
        if instant >= self.first_week_of_year(year + 1) {
            return 1;
        }
        ((instant - first) / MILLIS_PER_WEEK) as u32 + 1
    }

    pub fn weekyear(&self, instant: Instant) -> i32 {
        let year = self.year(instant);
        let week = self.week_of_weekyear(instant);
        if week == 1 {
            self.year(instant + MILLIS_PER_WEEK)
        } else if week > 51 {
            self.year(instant - 2 * MILLIS_PER_WEEK)
        } else {
            year
        }
    }

    /// Midnight of the given internal year/month/day. Unchecked: the caller
    /// guarantees the values are in range.
    pub fn year_month_day_millis(&self, year: i32, month: u32, day: u32) -> Instant {
        let days = i64::from(self.days_before_month(year, month)) + i64::from(day) - 1;
        self.hooks.year_start_instant(year) + days * MILLIS_PER_DAY
    }

    /// Validated composition from an external (skip-zero) year.
    pub fn date_time_millis(
        &self,
        year: i32,
        month: u32,
        day: u32,
        millis_of_day: i64,
    ) -> Result<Instant> {
        let internal = skip::to_internal("year", year)?;
        verify_value_bounds(
            "year",
            i64::from(year),
            i64::from(skip::to_external(self.hooks.min_year())),
            i64::from(self.hooks.max_year()),
        )?;
        let months = self.hooks.months_per_year();
        verify_value_bounds("monthOfYear", i64::from(month), 1, i64::from(months))?;
        let days = self.hooks.days_in_year_month(internal, month);
        verify_value_bounds("dayOfMonth", i64::from(day), 1, i64::from(days))?;
        verify_value_bounds("millisOfDay", millis_of_day, 0, MILLIS_PER_DAY - 1)?;
        Ok(self.year_month_day_millis(internal, month, day) + millis_of_day)
    }

    /// Move `instant` to internal `year`, keeping month and millisecond of
    /// day; the day of month is clamped to the target month's length.
    pub fn set_year(&self, instant: Instant, year: i32) -> Result<Instant> {
        self.verify_year(year)?;
        let this_year = self.year(instant);
        let month = self.month_of_year_in(instant, this_year);
        let day = self.day_of_year_in(instant, this_year) - self.days_before_month(this_year, month);
        self.set_year_month_day(instant, year, month, day)
    }

    /// Move `instant` to `month` of its year, clamping the day of month.
    pub fn set_month(&self, instant: Instant, month: u32) -> Result<Instant> {
        let year = self.year(instant);
        let this_month = self.month_of_year_in(instant, year);
        let day = self.day_of_year_in(instant, year) - self.days_before_month(year, this_month);
        self.set_year_month_day(instant, year, month, day)
    }

    /// Move `instant` to `weekyear`, keeping week number (clamped), day of
    /// week and millisecond of day.
    pub fn set_weekyear(&self, instant: Instant, weekyear: i32) -> Result<Instant> {
        self.verify_year(weekyear)?;
        if self.weekyear(instant) == weekyear {
            return Ok(instant);
        }
        let week = self.week_of_weekyear(instant).min(self.weeks_in_year(weekyear));
        let day_of_week = Self::day_of_week(instant);
        Ok(self.first_week_of_year(weekyear)
            + i64::from(week - 1) * MILLIS_PER_WEEK
            + i64::from(day_of_week - 1) * MILLIS_PER_DAY
            + Self::millis_of_day(instant))
    }

    fn set_year_month_day(&self, instant: Instant, year: i32, month: u32, day: u32) -> Result<Instant> {
        let day = day.min(self.hooks.days_in_year_month(year, month));
        Ok(self.year_month_day_millis(year, month, day) + Self::millis_of_day(instant))
    }

    fn verify_year(&self, year: i32) -> Result<()> {
        verify_value_bounds(
            "year",
            i64::from(year),
            i64::from(self.hooks.min_year()),
            i64::from(self.hooks.max_year()),
        )
    }

    /// Add `amount` months, rolling the year and clamping the day of month.
    pub fn add_months(&self, instant: Instant, amount: i64, per_year: u32) -> Result<Instant> {
        let overflow = ChronologyError::Overflow {
            unit: "months",
            amount,
        };
        let year = self.year(instant);
        let month = self.month_of_year_in(instant, year);
        let day = self.day_of_year_in(instant, year) - self.days_before_month(year, month);
        let total = i64::from(month - 1)
            .checked_add(amount)
            .ok_or_else(|| overflow.clone())?;
        let per_year = i64::from(per_year);
        let new_year = i64::from(year)
            .checked_add(total.div_euclid(per_year))
            .ok_or_else(|| overflow.clone())?;
        let new_year = i32::try_from(new_year).map_err(|_| overflow)?;
        self.verify_year(new_year)?;
        let new_month = total.rem_euclid(per_year) as u32 + 1;
        self.set_year_month_day(instant, new_year, new_month, day)
    }
}
