//! The Bikram Sambat chronology handle.
//!
//! A [`BikramSambatChronology`] is a cheap, clonable reference to one
//! immutable instance. Instances come from a [`ChronologyRegistry`], which
//! guarantees one instance per `(zone, min_days_in_first_week)` key; clones
//! and deserialized copies point at that same instance.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Weak};

use chrono_tz::Tz;
use chronology_core::{
    Basic, CalendarHooks, Chronology, DurationField, FieldType, Fields, Instant,
    LimitChronology, Result, ZonedChronology,
};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::assemble;
use crate::engine::CalendarEngine;
use crate::registry::{ChronologyKey, ChronologyRegistry, RegistryInner};

/// The decorator a chronology wraps, if any.
#[derive(Debug)]
pub enum Base {
    /// Bound enforcement over the raw UTC chronology.
    Limit(LimitChronology<BikramSambatChronology>),
    /// Zone offsets over the bounded UTC chronology.
    Zoned(ZonedChronology<BikramSambatChronology>),
}

impl Base {
    pub(crate) fn shared_fields(&self) -> Arc<Fields> {
        match self {
            Base::Limit(limit) => Arc::clone(&limit.base().inner.fields),
            Base::Zoned(zoned) => Arc::clone(&zoned.base().inner.fields),
        }
    }

    fn chronology(&self) -> &dyn Chronology {
        match self {
            Base::Limit(limit) => limit,
            Base::Zoned(zoned) => zoned,
        }
    }
}

struct Inner {
    engine: CalendarEngine,
    base: Option<Base>,
    min_days_in_first_week: u8,
    fields: Arc<Fields>,
    registry: Weak<RegistryInner>,
}

#[derive(Clone)]
pub struct BikramSambatChronology {
    inner: Arc<Inner>,
}

/// A decomposed instant, in the chronology's zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CivilDate {
    pub era: String,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub day_of_year: u32,
    pub weekyear: i32,
    pub millis_of_day: i64,
    pub leap_day: bool,
}

impl BikramSambatChronology {
    pub(crate) fn new(
        engine: CalendarEngine,
        base: Option<Base>,
        min_days_in_first_week: u8,
        registry: Weak<RegistryInner>,
    ) -> Self {
        let fields = assemble::assemble(base.as_ref(), &engine);
        Self {
            inner: Arc::new(Inner {
                engine,
                base,
                min_days_in_first_week,
                fields,
                registry,
            }),
        }
    }

    pub fn base(&self) -> Option<&Base> {
        self.inner.base.as_ref()
    }

    pub fn engine(&self) -> &CalendarEngine {
        &self.inner.engine
    }

    pub fn min_days_in_first_week(&self) -> u8 {
        self.inner.min_days_in_first_week
    }

    pub fn key(&self) -> ChronologyKey {
        ChronologyKey::new(self.zone(), self.min_days_in_first_week())
    }

    /// Whether both handles refer to the same instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// The registry this instance was built by.
    ///
    /// Once that registry has been dropped, a fresh one over the same leap
    /// rule is returned.
    pub fn registry(&self) -> ChronologyRegistry {
        match self.inner.registry.upgrade() {
            Some(inner) => ChronologyRegistry::from_inner(inner),
            None => ChronologyRegistry::new(Arc::clone(self.engine().rule())),
        }
    }

    /// The UTC instance with the same week configuration.
    pub fn with_utc(&self) -> Self {
        self.with_zone(Tz::UTC)
    }

    /// The instance for `zone` with the same week configuration.
    pub fn with_zone(&self, zone: Tz) -> Self {
        if zone == self.zone() {
            return self.clone();
        }
        self.registry().slot(zone, self.min_days_in_first_week())
    }

    /// Decomposition context over the raw calendar arithmetic (UTC, unbounded).
    pub fn basic(&self) -> Basic<'_> {
        Basic::new(&self.inner.engine, self.inner.min_days_in_first_week)
    }

    /// Earliest supported instant, if a lower bound is imposed.
    pub fn lower_limit(&self) -> Option<Instant> {
        match self.base()? {
            Base::Limit(limit) => limit.lower_limit(),
            Base::Zoned(zoned) => zoned.base().lower_limit(),
        }
    }

    /// First moment of external date 1-01-01 in the raw arithmetic.
    pub(crate) fn earliest_instant(&self) -> Instant {
        self.basic().year_month_day_millis(1, 1, 1)
    }

    fn local_instant(&self, instant: Instant) -> Instant {
        match self.base() {
            Some(Base::Zoned(zoned)) => zoned.to_local(instant),
            _ => instant,
        }
    }

    /// All calendar components of `instant` in this chronology's zone.
    pub fn decompose(&self, instant: Instant) -> Result<CivilDate> {
        let year = self.get(FieldType::Year, instant)?;
        let local = self.local_instant(instant);
        let basic = self.basic();
        Ok(CivilDate {
            era: self.as_text(FieldType::Era, instant)?,
            year,
            month: self.get(FieldType::MonthOfYear, instant)? as u32,
            day: basic.day_of_month(local),
            day_of_year: basic.day_of_year(local),
            weekyear: self.get(FieldType::Weekyear, instant)?,
            millis_of_day: Basic::millis_of_day(local),
            leap_day: self.is_leap_day(instant),
        })
    }
}

impl Chronology for BikramSambatChronology {
    fn zone(&self) -> Tz {
        match self.base() {
            Some(base) => base.chronology().zone(),
            None => Tz::UTC,
        }
    }

    fn fields(&self) -> &Fields {
        &self.inner.fields
    }

    fn date_time_millis(
        &self,
        year: i32,
        month: u32,
        day: u32,
        millis_of_day: i64,
    ) -> Result<Instant> {
        match self.base() {
            Some(base) => base
                .chronology()
                .date_time_millis(year, month, day, millis_of_day),
            None => self.basic().date_time_millis(year, month, day, millis_of_day),
        }
    }

    fn get(&self, field: FieldType, instant: Instant) -> Result<i32> {
        match self.base() {
            Some(base) => base.chronology().get(field, instant),
            None => Ok(self.inner.fields.field(field).get(&self.basic(), instant)),
        }
    }

    fn set(&self, field: FieldType, instant: Instant, value: i32) -> Result<Instant> {
        match self.base() {
            Some(base) => base.chronology().set(field, instant, value),
            None => self
                .inner
                .fields
                .field(field)
                .set(&self.basic(), instant, value),
        }
    }

    fn add(&self, duration: DurationField, instant: Instant, amount: i64) -> Result<Instant> {
        match self.base() {
            Some(base) => base.chronology().add(duration, instant, amount),
            None => duration.add(&self.basic(), instant, amount),
        }
    }

    fn as_text(&self, field: FieldType, instant: Instant) -> Result<String> {
        match self.base() {
            Some(base) => base.chronology().as_text(field, instant),
            None => Ok(self.inner.fields.field(field).as_text(&self.basic(), instant)),
        }
    }
}

impl CalendarHooks for BikramSambatChronology {
    fn is_leap_year(&self, year: i32) -> bool {
        self.inner.engine.is_leap_year(year)
    }

    /// Evaluated on the local date in this chronology's zone.
    fn is_leap_day(&self, instant: Instant) -> bool {
        self.inner.engine.is_leap_day(self.local_instant(instant))
    }

    fn year_start_instant(&self, year: i32) -> Instant {
        self.inner.engine.year_start_instant(year)
    }

    fn min_year(&self) -> i32 {
        self.inner.engine.min_year()
    }

    fn max_year(&self) -> i32 {
        self.inner.engine.max_year()
    }

    fn approx_epoch_midpoint(&self) -> Instant {
        self.inner.engine.approx_epoch_midpoint()
    }

    fn average_millis_per_year_divided_by_two(&self) -> i64 {
        self.inner.engine.average_millis_per_year_divided_by_two()
    }

    fn months_per_year(&self) -> u32 {
        self.inner.engine.months_per_year()
    }

    fn days_in_year(&self, year: i32) -> u32 {
        self.inner.engine.days_in_year(year)
    }

    fn days_in_year_month(&self, year: i32, month: u32) -> u32 {
        self.inner.engine.days_in_year_month(year, month)
    }

    fn assemble_fields(&self, fields: Fields) -> Fields {
        self.inner.engine.assemble_fields(fields)
    }
}

/// Equal when the configuration key matches and both consult the same leap
/// rule.
impl PartialEq for BikramSambatChronology {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
            || (self.key() == other.key() && self.engine().same_rule(other.engine()))
    }
}

impl Eq for BikramSambatChronology {}

impl Hash for BikramSambatChronology {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Debug for BikramSambatChronology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BikramSambatChronology")
            .field("zone", &self.zone().name())
            .field("min_days_in_first_week", &self.min_days_in_first_week())
            .field("decorated", &self.base().is_some())
            .finish()
    }
}

impl fmt::Display for BikramSambatChronology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BikramSambatChronology[{}", self.zone().name())?;
        if self.min_days_in_first_week() != crate::DEFAULT_MIN_DAYS_IN_FIRST_WEEK {
            write!(f, ",mdfw={}", self.min_days_in_first_week())?;
        }
        f.write_str("]")
    }
}

/// Only the configuration key is persisted.
impl Serialize for BikramSambatChronology {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.key().serialize(serializer)
    }
}

/// Resolves the persisted key through the default registry, yielding the
/// canonical instance rather than a copy. Use the [`ChronologyRegistry`]
/// `DeserializeSeed` impl for instances of a registry with a custom rule.
impl<'de> Deserialize<'de> for BikramSambatChronology {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let key = ChronologyKey::deserialize(deserializer)?;
        ChronologyRegistry::global()
            .resolve(&key)
            .map_err(de::Error::custom)
    }
}
