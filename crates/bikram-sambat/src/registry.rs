//! Per-zone instance registry.
//!
//! Every `(zone, min_days_in_first_week)` key maps to exactly one
//! [`BikramSambatChronology`]. Each zone owns seven lazily-initialised
//! slots, one per permitted week configuration; a slot is built at most once
//! even when many threads ask for it concurrently.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock, OnceLock, RwLock};

use chrono_tz::Tz;
use chronology_core::{Chronology, LimitChronology, ZonedChronology};
use serde::de::{self, DeserializeSeed};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::chronology::{Base, BikramSambatChronology};
use crate::config;
use crate::engine::CalendarEngine;
use crate::error::{CalendarError, Result};
use crate::rule::LeapYearRule;
use crate::DEFAULT_MIN_DAYS_IN_FIRST_WEEK;

/// Permitted values of `min_days_in_first_week`.
pub const MIN_DAYS_RANGE: std::ops::RangeInclusive<u8> = 1..=7;

static GLOBAL: LazyLock<ChronologyRegistry> =
    LazyLock::new(|| ChronologyRegistry::new(Arc::new(crate::ProvisionalLeapRule)));

/// Identity of a chronology instance. This is what gets persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChronologyKey {
    #[serde(with = "zone_name")]
    pub zone: Tz,
    pub min_days_in_first_week: u8,
}

impl ChronologyKey {
    pub fn new(zone: Tz, min_days_in_first_week: u8) -> Self {
        Self {
            zone,
            min_days_in_first_week,
        }
    }
}

mod zone_name {
    use chrono_tz::Tz;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(zone: &Tz, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(zone.name())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Tz, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse::<Tz>().map_err(de::Error::custom)
    }
}

#[derive(Default)]
struct ZoneSlots([OnceLock<BikramSambatChronology>; 7]);

pub(crate) struct RegistryInner {
    engine: CalendarEngine,
    zones: RwLock<HashMap<Tz, Arc<ZoneSlots>>>,
}

/// Cache of chronology instances sharing one leap-year rule.
///
/// Cloning a registry yields another handle to the same cache.
#[derive(Clone)]
pub struct ChronologyRegistry {
    inner: Arc<RegistryInner>,
}

/// A fresh cache over the process-wide provisional rule.
impl Default for ChronologyRegistry {
    fn default() -> Self {
        Self::new(Arc::clone(GLOBAL.engine().rule()))
    }
}

impl fmt::Debug for ChronologyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChronologyRegistry")
            .field("rule", self.inner.engine.rule())
            .field("constructed", &self.constructed())
            .finish()
    }
}

impl ChronologyRegistry {
    pub fn new(rule: Arc<dyn LeapYearRule>) -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                engine: CalendarEngine::new(rule),
                zones: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// The process-wide registry, using the provisional leap rule.
    pub fn global() -> &'static ChronologyRegistry {
        &GLOBAL
    }

    pub(crate) fn from_inner(inner: Arc<RegistryInner>) -> Self {
        Self { inner }
    }

    pub fn engine(&self) -> &CalendarEngine {
        &self.inner.engine
    }

    /// Instance in the default zone (see [`config::default_zone`]).
    pub fn get_instance(&self) -> BikramSambatChronology {
        self.slot(config::default_zone(), DEFAULT_MIN_DAYS_IN_FIRST_WEEK)
    }

    pub fn get_instance_in(&self, zone: Tz) -> BikramSambatChronology {
        self.slot(zone, DEFAULT_MIN_DAYS_IN_FIRST_WEEK)
    }

    /// Instance for `zone` with a custom week configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidArgument`] unless
    /// `min_days_in_first_week` is between 1 and 7.
    pub fn get_instance_with(
        &self,
        zone: Tz,
        min_days_in_first_week: u8,
    ) -> Result<BikramSambatChronology> {
        if !MIN_DAYS_RANGE.contains(&min_days_in_first_week) {
            return Err(CalendarError::InvalidArgument(format!(
                "Invalid min days in first week: {min_days_in_first_week}"
            )));
        }
        Ok(self.slot(zone, min_days_in_first_week))
    }

    pub fn get_instance_utc(&self) -> BikramSambatChronology {
        self.slot(Tz::UTC, DEFAULT_MIN_DAYS_IN_FIRST_WEEK)
    }

    /// The canonical instance for a persisted key.
    ///
    /// Plain deserialization resolves through [`ChronologyRegistry::global`].
    /// Instances of a registry with a custom rule round-trip only through
    /// this method or the registry's [`DeserializeSeed`] impl.
    pub fn resolve(&self, key: &ChronologyKey) -> Result<BikramSambatChronology> {
        self.get_instance_with(key.zone, key.min_days_in_first_week)
    }

    /// Number of instances built so far.
    pub fn constructed(&self) -> usize {
        let zones = self
            .inner
            .zones
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        zones
            .values()
            .map(|slots| slots.0.iter().filter(|slot| slot.get().is_some()).count())
            .sum()
    }

    /// `min_days_in_first_week` must already be validated.
    pub(crate) fn slot(&self, zone: Tz, min_days_in_first_week: u8) -> BikramSambatChronology {
        debug_assert!(MIN_DAYS_RANGE.contains(&min_days_in_first_week));
        let slots = self.zone_slots(zone);
        slots.0[usize::from(min_days_in_first_week) - 1]
            .get_or_init(|| self.construct(zone, min_days_in_first_week))
            .clone()
    }

    fn zone_slots(&self, zone: Tz) -> Arc<ZoneSlots> {
        {
            let zones = self
                .inner
                .zones
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if let Some(slots) = zones.get(&zone) {
                return Arc::clone(slots);
            }
        }
        let mut zones = self
            .inner
            .zones
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(zones.entry(zone).or_default())
    }

    // Runs with no map lock held; building a zoned instance recurses into
    // the UTC slot.
    fn construct(&self, zone: Tz, min_days_in_first_week: u8) -> BikramSambatChronology {
        let engine = self.inner.engine.clone();
        let registry = Arc::downgrade(&self.inner);

        let chronology = if zone == Tz::UTC {
            let raw = BikramSambatChronology::new(
                engine.clone(),
                None,
                min_days_in_first_week,
                registry.clone(),
            );
            let lower = raw.earliest_instant();
            let limit = LimitChronology::new(raw, Some(lower), None);
            BikramSambatChronology::new(
                engine,
                Some(Base::Limit(limit)),
                min_days_in_first_week,
                registry,
            )
        } else {
            let utc = self.slot(Tz::UTC, min_days_in_first_week);
            let zoned = ZonedChronology::new(utc, zone);
            BikramSambatChronology::new(
                engine,
                Some(Base::Zoned(zoned)),
                min_days_in_first_week,
                registry,
            )
        };
        debug!(
            zone = chronology.zone().name(),
            min_days_in_first_week, "constructed Bikram Sambat chronology"
        );
        chronology
    }
}

/// Deserializes a persisted instance against this registry's rule.
impl<'de> DeserializeSeed<'de> for &ChronologyRegistry {
    type Value = BikramSambatChronology;

    fn deserialize<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> std::result::Result<Self::Value, D::Error> {
        let key = ChronologyKey::deserialize(deserializer)?;
        self.resolve(&key).map_err(de::Error::custom)
    }
}

/// Instance in the default zone, from the process-wide registry.
pub fn get_instance() -> BikramSambatChronology {
    ChronologyRegistry::global().get_instance()
}

pub fn get_instance_in(zone: Tz) -> BikramSambatChronology {
    ChronologyRegistry::global().get_instance_in(zone)
}

/// See [`ChronologyRegistry::get_instance_with`].
pub fn get_instance_with(zone: Tz, min_days_in_first_week: u8) -> Result<BikramSambatChronology> {
    ChronologyRegistry::global().get_instance_with(zone, min_days_in_first_week)
}

pub fn get_instance_utc() -> BikramSambatChronology {
    ChronologyRegistry::global().get_instance_utc()
}
