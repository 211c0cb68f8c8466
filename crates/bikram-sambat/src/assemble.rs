//! Field assembly.
//!
//! A raw chronology builds its own field set from the framework's base set.
//! A decorated chronology shares the field set of the chronology it wraps,
//! so decorators never stack a second layer of field wrappers.

use std::sync::Arc;

use chronology_core::{
    CalendarHooks, DateTimeField, Fields, MonthOfYearField, SingleEraField, SkipZeroField,
};

use crate::chronology::Base;
use crate::engine::MONTHS_PER_YEAR;

/// Label of the calendar's only era.
pub const ERA_LABEL: &str = "BS";

/// Fields for a chronology with the given base (if any).
pub fn assemble(base: Option<&Base>, hooks: &dyn CalendarHooks) -> Arc<Fields> {
    match base {
        Some(base) => base.shared_fields(),
        None => Arc::new(hooks.assemble_fields(Fields::base())),
    }
}

/// Substitute the Bikram Sambat fields into `fields`.
///
/// There is no year zero, for years or week-years.
pub fn install_calendar_fields(fields: Fields) -> Fields {
    let month_of_year = MonthOfYearField::new(MONTHS_PER_YEAR);
    Fields {
        era: Box::new(SingleEraField::new(ERA_LABEL)),
        year: Box::new(SkipZeroField::new(fields.year)),
        weekyear: Box::new(SkipZeroField::new(fields.weekyear)),
        months: month_of_year.duration_field(),
        month_of_year: Box::new(month_of_year),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::CalendarEngine;
    use chronology_core::{Basic, DurationField, FieldType};

    #[test]
    fn raw_assembly_installs_calendar_fields() {
        let engine = CalendarEngine::default();
        let fields = assemble(None, &engine);
        let basic = Basic::new(&engine, 4);
        let instant = engine.year_start_instant(2080);

        assert_eq!(fields.era.as_text(&basic, instant), "BS");
        assert_eq!(fields.era.get(&basic, instant), 1);
        assert_eq!(fields.month_of_year.maximum_value(&basic), 13);
        assert_eq!(fields.months, DurationField::Months { per_year: 13 });
        assert_eq!(fields.field(FieldType::Year).get(&basic, instant), 2080);
    }

    #[test]
    fn year_and_weekyear_skip_zero() {
        let engine = CalendarEngine::default();
        let fields = assemble(None, &engine);
        let basic = Basic::new(&engine, 4);
        let mid_year_zero = engine.year_start_instant(0) + 100 * chronology_core::MILLIS_PER_DAY;

        assert_eq!(fields.year.get(&basic, mid_year_zero), -1);
        assert_eq!(fields.weekyear.get(&basic, mid_year_zero), -1);
        assert!(fields.year.set(&basic, mid_year_zero, 0).is_err());
        assert!(fields.weekyear.set(&basic, mid_year_zero, 0).is_err());
    }
}
