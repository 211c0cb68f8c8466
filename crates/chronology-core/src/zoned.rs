//! Timezone-imposing chronology decorator.
//!
//! The wrapped chronology works in local time; this layer converts between
//! UTC instants and local instants using `chrono-tz` offsets.

use chrono::{DateTime, LocalResult, Offset, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{ChronologyError, Result};
use crate::field::{DurationField, FieldType, Fields};
use crate::hooks::Chronology;
use crate::{Instant, MILLIS_PER_SECOND};

#[derive(Debug, Clone)]
pub struct ZonedChronology<C> {
    base: C,
    zone: Tz,
}

impl<C: Chronology> ZonedChronology<C> {
    pub fn new(base: C, zone: Tz) -> Self {
        Self { base, zone }
    }

    pub fn base(&self) -> &C {
        &self.base
    }

    /// Offset from UTC at `instant`, in milliseconds.
    ///
    /// Instants outside chrono's representable range have no zone data and
    /// use a zero offset.
    pub fn offset_millis(&self, instant: Instant) -> i64 {
        DateTime::<Utc>::from_timestamp_millis(instant)
            .map(|utc| {
                let offset = self.zone.offset_from_utc_datetime(&utc.naive_utc());
                i64::from(offset.fix().local_minus_utc()) * MILLIS_PER_SECOND
            })
            .unwrap_or(0)
    }

    pub fn to_local(&self, instant: Instant) -> Instant {
        instant.saturating_add(self.offset_millis(instant))
    }

    /// Convert a local instant back to UTC. Ambiguous local times resolve
    /// to the earlier instant; local times inside a gap are rejected.
    pub fn to_utc(&self, local: Instant) -> Result<Instant> {
        let Some(naive) = DateTime::<Utc>::from_timestamp_millis(local).map(|dt| dt.naive_utc()) else {
            return Ok(local);
        };
        match self.zone.from_local_datetime(&naive) {
            LocalResult::Single(dt) => Ok(dt.timestamp_millis()),
            LocalResult::Ambiguous(earliest, _) => Ok(earliest.timestamp_millis()),
            LocalResult::None => Err(ChronologyError::SkippedLocalTime {
                local,
                zone: self.zone.name().to_string(),
            }),
        }
    }
}

impl<C: Chronology> Chronology for ZonedChronology<C> {
    fn zone(&self) -> Tz {
        self.zone
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
        let local = self.base.date_time_millis(year, month, day, millis_of_day)?;
        self.to_utc(local)
    }

    fn get(&self, field: FieldType, instant: Instant) -> Result<i32> {
        self.base.get(field, self.to_local(instant))
    }

    fn set(&self, field: FieldType, instant: Instant, value: i32) -> Result<Instant> {
        let local = self.base.set(field, self.to_local(instant), value)?;
        self.to_utc(local)
    }

    fn add(&self, duration: DurationField, instant: Instant, amount: i64) -> Result<Instant> {
        let local = self.base.add(duration, self.to_local(instant), amount)?;
        self.to_utc(local)
    }

    fn as_text(&self, field: FieldType, instant: Instant) -> Result<String> {
        self.base.as_text(field, self.to_local(instant))
    }
}
