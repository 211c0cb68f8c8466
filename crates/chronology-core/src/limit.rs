//! Bound-imposing chronology decorator.

use chrono_tz::Tz;

use crate::error::{ChronologyError, Result};
use crate::field::{DurationField, FieldType, Fields};
use crate::hooks::Chronology;
use crate::Instant;

/// Wraps a chronology and rejects instants outside `[lower, upper)`.
///
/// Both the input and the result of every operation are checked.
#[derive(Debug, Clone)]
pub struct LimitChronology<C> {
    base: C,
    lower: Option<Instant>,
    upper: Option<Instant>,
}

impl<C: Chronology> LimitChronology<C> {
    pub fn new(base: C, lower: Option<Instant>, upper: Option<Instant>) -> Self {
        Self { base, lower, upper }
    }

    pub fn base(&self) -> &C {
        &self.base
    }

    pub fn lower_limit(&self) -> Option<Instant> {
        self.lower
    }

    pub fn upper_limit(&self) -> Option<Instant> {
        self.upper
    }

    pub fn check(&self, instant: Instant) -> Result<Instant> {
        if let Some(limit) = self.lower {
            if instant < limit {
                return Err(ChronologyError::BelowLowerLimit { instant, limit });
            }
        }
        if let Some(limit) = self.upper {
            if instant >= limit {
                return Err(ChronologyError::AboveUpperLimit { instant, limit });
            }
        }
        Ok(instant)
    }
}

impl<C: Chronology> Chronology for LimitChronology<C> {
    fn zone(&self) -> Tz {
        self.base.zone()
    }

    fn fields(&self) -> &Fields {
        self.base.fields()
    }

    fn date_time_millis(
        &self,
        year: i32,
        month: u32,
        day: u32,
        millis_of_day: i64,
    ) -> Result<Instant> {
        let instant = self.base.date_time_millis(year, month, day, millis_of_day)?;
        self.check(instant)
    }

    fn get(&self, field: FieldType, instant: Instant) -> Result<i32> {
        self.check(instant)?;
        self.base.get(field, instant)
    }

    fn set(&self, field: FieldType, instant: Instant, value: i32) -> Result<Instant> {
        self.check(instant)?;
        let result = self.base.set(field, instant, value)?;
        self.check(result)
    }

    fn add(&self, duration: DurationField, instant: Instant, amount: i64) -> Result<Instant> {
        self.check(instant)?;
        let result = self.base.add(duration, instant, amount)?;
        self.check(result)
    }

    fn as_text(&self, field: FieldType, instant: Instant) -> Result<String> {
        self.check(instant)?;
        self.base.as_text(field, instant)
    }
}
