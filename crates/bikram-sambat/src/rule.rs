//! Leap-year rules.
//!
//! Bikram Sambat month lengths and intercalation are fixed each year by an
//! almanac committee, so there is no closed formula to derive them from. The
//! engine takes the rule as data through [`LeapYearRule`].

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Source of truth for which years are leap years.
pub trait LeapYearRule: fmt::Debug + Send + Sync {
    fn is_leap_year(&self, year: i32) -> bool;
}

/// Quadrennial placeholder: every year congruent to 3 mod 4 is leap.
///
/// This is the leap pattern the current year-start constants assume, so it
/// keeps year starts and year lengths mutually consistent. It is not the
/// administrative Bikram Sambat table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProvisionalLeapRule;

impl LeapYearRule for ProvisionalLeapRule {
    fn is_leap_year(&self, year: i32) -> bool {
        year.rem_euclid(4) == 3
    }
}

/// Explicit set of leap years, typically loaded from published almanac data.
///
/// Serialized as `{"leap_years": [2000, 2004, ...]}`. Years not listed are
/// common years.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeapYearTable {
    leap_years: BTreeSet<i32>,
}

impl LeapYearTable {
    pub fn new(leap_years: impl IntoIterator<Item = i32>) -> Self {
        Self {
            leap_years: leap_years.into_iter().collect(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn leap_years(&self) -> impl Iterator<Item = i32> + '_ {
        self.leap_years.iter().copied()
    }
}

impl LeapYearRule for LeapYearTable {
    fn is_leap_year(&self, year: i32) -> bool {
        self.leap_years.contains(&year)
    }
}
