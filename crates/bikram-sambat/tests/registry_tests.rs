//! Tests for the instance registry: identity, validation, serde identity and
//! concurrent first access.

use std::sync::{Arc, Barrier};
use std::thread;

use bikram_sambat::{
    get_instance, get_instance_in, get_instance_utc, get_instance_with, BikramSambatChronology,
    CalendarError, CalendarHooks, Chronology, ChronologyKey, ChronologyRegistry, LeapYearTable,
};
use chrono_tz::Tz;
use serde::de::DeserializeSeed;

const KATHMANDU: Tz = chrono_tz::Asia::Kathmandu;

fn table_registry() -> ChronologyRegistry {
    ChronologyRegistry::new(Arc::new(LeapYearTable::new([2000])))
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

#[test]
fn same_key_returns_same_instance() {
    let a = get_instance_with(KATHMANDU, 4).unwrap();
    let b = get_instance_with(KATHMANDU, 4).unwrap();
    assert!(a.ptr_eq(&b));
    assert!(a.ptr_eq(&get_instance_in(KATHMANDU)));
}

#[test]
fn utc_helpers_agree() {
    let utc = get_instance_utc();
    assert!(utc.ptr_eq(&get_instance_in(Tz::UTC)));
    assert!(utc.ptr_eq(&get_instance_with(Tz::UTC, 4).unwrap()));
    assert_eq!(utc.zone(), Tz::UTC);
}

#[test]
fn default_instance_uses_default_zone() {
    let bs = get_instance();
    assert_eq!(bs.zone(), bikram_sambat::config::default_zone());
    assert_eq!(bs.min_days_in_first_week(), 4);
}

#[test]
fn different_keys_are_distinct_instances() {
    let four = get_instance_with(KATHMANDU, 4).unwrap();
    let one = get_instance_with(KATHMANDU, 1).unwrap();
    let utc = get_instance_with(Tz::UTC, 4).unwrap();
    assert!(!four.ptr_eq(&one));
    assert!(!four.ptr_eq(&utc));
    assert_ne!(four, one);
    assert_ne!(four, utc);
}

#[test]
fn separate_registries_do_not_share_instances() {
    let a = ChronologyRegistry::default().get_instance_in(KATHMANDU);
    let b = ChronologyRegistry::default().get_instance_in(KATHMANDU);
    assert!(!a.ptr_eq(&b));
    // Same key and the same provisional rule.
    assert_eq!(a, b);
}

#[test]
fn instances_with_different_rules_are_not_equal() {
    let table = table_registry().get_instance_in(KATHMANDU);
    let provisional = get_instance_in(KATHMANDU);
    assert_eq!(table.key(), provisional.key());
    assert_ne!(table, provisional);
}

#[test]
fn with_zone_keeps_week_configuration() {
    let registry = ChronologyRegistry::default();
    let utc = registry.get_instance_with(Tz::UTC, 2).unwrap();
    let zoned = utc.with_zone(KATHMANDU);
    assert_eq!(zoned.zone(), KATHMANDU);
    assert_eq!(zoned.min_days_in_first_week(), 2);
    assert!(zoned.ptr_eq(&registry.get_instance_with(KATHMANDU, 2).unwrap()));
    assert!(zoned.with_utc().ptr_eq(&utc));
    assert!(utc.with_zone(Tz::UTC).ptr_eq(&utc));
}

#[test]
fn with_zone_keeps_leap_rule_after_registry_is_dropped() {
    let utc = table_registry().get_instance_utc();
    assert!(utc.is_leap_year(2000));

    let zoned = utc.with_zone(KATHMANDU);
    assert_eq!(zoned.zone(), KATHMANDU);
    assert!(zoned.is_leap_year(2000));
    assert!(!zoned.is_leap_year(1963));
    assert_eq!(zoned.year_start_instant(2001), utc.year_start_instant(2001));

    let back = zoned.with_utc();
    assert!(back.is_leap_year(2000));
    assert_eq!(back, utc);
    assert_ne!(back, get_instance_utc());
}

#[test]
fn registry_of_a_dropped_registry_keeps_the_rule() {
    let bs = table_registry().get_instance_in(KATHMANDU);
    let registry = bs.registry();
    assert!(registry.engine().is_leap_year(2000));
    assert!(registry.engine().same_rule(bs.engine()));
}

#[test]
fn display_names_zone_and_non_default_week_config() {
    assert_eq!(get_instance_utc().to_string(), "BikramSambatChronology[UTC]");
    assert_eq!(
        get_instance_with(KATHMANDU, 1).unwrap().to_string(),
        "BikramSambatChronology[Asia/Kathmandu,mdfw=1]"
    );
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn min_days_outside_one_to_seven_is_rejected() {
    for bad in [0, 8, 255] {
        let err = get_instance_with(KATHMANDU, bad).unwrap_err();
        assert!(
            matches!(err, CalendarError::InvalidArgument(_)),
            "min days {bad}: {err:?}"
        );
    }
}

#[test]
fn min_days_bounds_are_accepted() {
    for ok in 1..=7 {
        let bs = get_instance_with(KATHMANDU, ok).unwrap();
        assert_eq!(bs.min_days_in_first_week(), ok);
    }
}

// ---------------------------------------------------------------------------
// Serde identity
// ---------------------------------------------------------------------------

#[test]
fn serializes_only_the_key() {
    let bs = get_instance_with(KATHMANDU, 5).unwrap();
    let json = serde_json::to_string(&bs).unwrap();
    assert_eq!(
        json,
        r#"{"zone":"Asia/Kathmandu","min_days_in_first_week":5}"#
    );
    assert_eq!(bs.key(), ChronologyKey::new(KATHMANDU, 5));
}

#[test]
fn deserialization_resolves_to_cached_instance() {
    let bs = get_instance_with(KATHMANDU, 3).unwrap();
    let json = serde_json::to_string(&bs).unwrap();
    let back: bikram_sambat::BikramSambatChronology = serde_json::from_str(&json).unwrap();
    assert!(back.ptr_eq(&bs));
}

#[test]
fn deserialization_before_first_use_still_canonical() {
    let json = r#"{"zone":"Pacific/Chatham","min_days_in_first_week":6}"#;
    let first: bikram_sambat::BikramSambatChronology = serde_json::from_str(json).unwrap();
    let second: bikram_sambat::BikramSambatChronology = serde_json::from_str(json).unwrap();
    assert!(first.ptr_eq(&second));
    assert!(first.ptr_eq(&get_instance_with(chrono_tz::Pacific::Chatham, 6).unwrap()));
}

#[test]
fn deserialization_validates_the_key() {
    let json = r#"{"zone":"UTC","min_days_in_first_week":9}"#;
    let err = serde_json::from_str::<bikram_sambat::BikramSambatChronology>(json).unwrap_err();
    assert!(err.to_string().contains("Invalid min days in first week: 9"));
}

#[test]
fn custom_registry_round_trips_through_seed() {
    let registry = table_registry();
    let bs = registry.get_instance_utc();
    let json = serde_json::to_string(&bs).unwrap();

    let mut de = serde_json::Deserializer::from_str(&json);
    let back = (&registry).deserialize(&mut de).unwrap();
    assert!(back.ptr_eq(&bs));
    assert!(back.is_leap_year(2000));
}

#[test]
fn plain_deserialization_of_custom_instance_is_not_equal() {
    let bs = table_registry().get_instance_utc();
    let json = serde_json::to_string(&bs).unwrap();
    let back: BikramSambatChronology = serde_json::from_str(&json).unwrap();
    assert!(back.ptr_eq(&get_instance_utc()));
    assert!(!back.is_leap_year(2000));
    assert_ne!(back, bs);
}

#[test]
fn custom_registry_resolves_keys_itself() {
    let registry = table_registry();
    let bs = registry.get_instance_in(KATHMANDU);
    let resolved = registry.resolve(&bs.key()).unwrap();
    assert!(resolved.ptr_eq(&bs));
    assert!(bs.registry().resolve(&bs.key()).unwrap().ptr_eq(&bs));
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[test]
fn concurrent_first_access_constructs_once() {
    let registry = ChronologyRegistry::default();
    let threads = 16;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let registry = registry.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                registry.get_instance_in(KATHMANDU)
            })
        })
        .collect();

    let instances: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for bs in &instances[1..] {
        assert!(bs.ptr_eq(&instances[0]));
    }
    // The Kathmandu instance plus the UTC instance it wraps.
    assert_eq!(registry.constructed(), 2);
}

#[test]
fn concurrent_access_across_zones() {
    let registry = ChronologyRegistry::default();
    let zones = [
        Tz::UTC,
        KATHMANDU,
        chrono_tz::Asia::Kolkata,
        chrono_tz::Europe::London,
        chrono_tz::America::New_York,
    ];

    let handles: Vec<_> = zones
        .iter()
        .flat_map(|&zone| (1..=7).map(move |d| (zone, d)))
        .map(|(zone, d)| {
            let registry = registry.clone();
            thread::spawn(move || registry.get_instance_with(zone, d).unwrap())
        })
        .collect();

    for handle in handles {
        let bs = handle.join().unwrap();
        let again = registry
            .get_instance_with(bs.zone(), bs.min_days_in_first_week())
            .unwrap();
        assert!(bs.ptr_eq(&again));
    }
    assert_eq!(registry.constructed(), zones.len() * 7);
}
