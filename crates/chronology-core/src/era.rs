//! Era fields.

use crate::basic::Basic;
use crate::error::{verify_value_bounds, Result};
use crate::field::{DateTimeField, DurationField, FieldType};
use crate::Instant;

/// Value of the era field for years before year 1.
pub const BEFORE_ERA: i32 = 0;

/// Value of the era field for year 1 onwards.
pub const CURRENT_ERA: i32 = 1;

/// Two-era field splitting the internal year axis at year 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardEraField;

impl DateTimeField for StandardEraField {
    fn field_type(&self) -> FieldType {
        FieldType::Era
    }

    fn get(&self, basic: &Basic<'_>, instant: Instant) -> i32 {
        if basic.year(instant) <= 0 {
            BEFORE_ERA
        } else {
            CURRENT_ERA
        }
    }

    fn set(&self, basic: &Basic<'_>, instant: Instant, value: i32) -> Result<Instant> {
        verify_value_bounds(
            FieldType::Era.name(),
            i64::from(value),
            i64::from(BEFORE_ERA),
            i64::from(CURRENT_ERA),
        )?;
        if self.get(basic, instant) == value {
            return Ok(instant);
        }
        // Mirror the year across the era boundary: 5 <-> -4 internally,
        // which is 5 <-> -5 in skip-zero numbering.
        basic.set_year(instant, 1 - basic.year(instant))
    }

    fn minimum_value(&self, _basic: &Basic<'_>) -> i32 {
        BEFORE_ERA
    }

    fn maximum_value(&self, _basic: &Basic<'_>) -> i32 {
        CURRENT_ERA
    }

    fn duration_field(&self) -> DurationField {
        DurationField::Eras
    }

    fn as_text(&self, basic: &Basic<'_>, instant: Instant) -> String {
        match self.get(basic, instant) {
            BEFORE_ERA => "BCE".to_string(),
            _ => "CE".to_string(),
        }
    }
}

/// Era field for calendars with exactly one era.
///
/// Always reads [`CURRENT_ERA`] and renders as `label`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingleEraField {
    label: &'static str,
}

impl SingleEraField {
    pub const fn new(label: &'static str) -> Self {
        Self { label }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl DateTimeField for SingleEraField {
    fn field_type(&self) -> FieldType {
        FieldType::Era
    }

    fn get(&self, _basic: &Basic<'_>, _instant: Instant) -> i32 {
        CURRENT_ERA
    }

    fn set(&self, _basic: &Basic<'_>, instant: Instant, value: i32) -> Result<Instant> {
        verify_value_bounds(
            FieldType::Era.name(),
            i64::from(value),
            i64::from(CURRENT_ERA),
            i64::from(CURRENT_ERA),
        )?;
        Ok(instant)
    }

    fn minimum_value(&self, _basic: &Basic<'_>) -> i32 {
        CURRENT_ERA
    }

    fn maximum_value(&self, _basic: &Basic<'_>) -> i32 {
        CURRENT_ERA
    }

    fn duration_field(&self) -> DurationField {
        DurationField::Eras
    }

    fn as_text(&self, _basic: &Basic<'_>, _instant: Instant) -> String {
        self.label.to_string()
    }
}
