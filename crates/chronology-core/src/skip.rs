//! Skip-zero numbering: external values run ..., -2, -1, 1, 2, ... over an
//! internal axis that includes zero.

use crate::basic::Basic;
use crate::error::{verify_value_bounds, ChronologyError, Result};
use crate::field::{DateTimeField, DurationField, FieldType};
use crate::Instant;

/// Map an internal value to skip-zero numbering.
pub fn to_external(internal: i32) -> i32 {
    if internal <= 0 {
        internal - 1
    } else {
        internal
    }
}

/// Map a skip-zero value back to the internal axis. Zero is rejected.
pub fn to_internal(field: &'static str, external: i32) -> Result<i32> {
    match external {
        0 => Err(ChronologyError::UnsupportedZero { field }),
        v if v < 0 => Ok(v + 1),
        v => Ok(v),
    }
}

/// Decorator that hides the value zero of the wrapped field.
#[derive(Debug)]
pub struct SkipZeroField {
    wrapped: Box<dyn DateTimeField>,
}

impl SkipZeroField {
    pub fn new(wrapped: Box<dyn DateTimeField>) -> Self {
        Self { wrapped }
    }

    pub fn wrapped(&self) -> &dyn DateTimeField {
        self.wrapped.as_ref()
    }
}

impl DateTimeField for SkipZeroField {
    fn field_type(&self) -> FieldType {
        self.wrapped.field_type()
    }

    fn get(&self, basic: &Basic<'_>, instant: Instant) -> i32 {
        to_external(self.wrapped.get(basic, instant))
    }

    fn set(&self, basic: &Basic<'_>, instant: Instant, value: i32) -> Result<Instant> {
        let name = self.field_type().name();
        verify_value_bounds(
            name,
            i64::from(value),
            i64::from(self.minimum_value(basic)),
            i64::from(self.maximum_value(basic)),
        )?;
        let internal = to_internal(name, value)?;
        self.wrapped.set(basic, instant, internal)
    }

    fn minimum_value(&self, basic: &Basic<'_>) -> i32 {
        let min = self.wrapped.minimum_value(basic);
        match min {
            m if m < 0 => m - 1,
            0 => 1,
            m => m,
        }
    }

    fn maximum_value(&self, basic: &Basic<'_>) -> i32 {
        self.wrapped.maximum_value(basic)
    }

    fn duration_field(&self) -> DurationField {
        self.wrapped.duration_field()
    }

    fn is_leap(&self, basic: &Basic<'_>, instant: Instant) -> bool {
        self.wrapped.is_leap(basic, instant)
    }
}
