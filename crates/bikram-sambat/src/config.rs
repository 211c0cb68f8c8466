//! Process configuration: the default zone.

use chrono_tz::Tz;
use tracing::warn;

use crate::error::{CalendarError, Result};

/// Environment variable consulted for the default zone.
pub const ZONE_ENV_VAR: &str = "TZ";

/// Parse an IANA zone name. A leading `:` (POSIX `TZ` syntax) is ignored.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidTimezone`] if the name is not in the
/// bundled zone database.
pub fn parse_zone(name: &str) -> Result<Tz> {
    let trimmed = name.trim();
    let trimmed = trimmed.strip_prefix(':').unwrap_or(trimmed);
    trimmed
        .parse::<Tz>()
        .map_err(|_| CalendarError::InvalidTimezone(name.to_string()))
}

/// The zone named by `TZ`, or UTC when it is unset or unrecognised.
pub fn default_zone() -> Tz {
    zone_from_env(std::env::var(ZONE_ENV_VAR).ok().as_deref())
}

fn zone_from_env(value: Option<&str>) -> Tz {
    match value.map(str::trim) {
        None | Some("") => Tz::UTC,
        Some(name) => parse_zone(name).unwrap_or_else(|err| {
            warn!(%err, "falling back to UTC as the default zone");
            Tz::UTC
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_posix_names() {
        assert_eq!(parse_zone("Asia/Kathmandu").unwrap(), chrono_tz::Asia::Kathmandu);
        assert_eq!(parse_zone(":Asia/Kathmandu").unwrap(), chrono_tz::Asia::Kathmandu);
        assert_eq!(parse_zone("UTC").unwrap(), Tz::UTC);
    }

    #[test]
    fn rejects_unknown_zone() {
        let err = parse_zone("Nowhere/Special").unwrap_err();
        assert_eq!(err.to_string(), "Invalid timezone: Nowhere/Special");
    }

    #[test]
    fn env_fallback_is_utc() {
        assert_eq!(zone_from_env(None), Tz::UTC);
        assert_eq!(zone_from_env(Some("")), Tz::UTC);
        assert_eq!(zone_from_env(Some("Nowhere/Special")), Tz::UTC);
        assert_eq!(zone_from_env(Some("Europe/London")), chrono_tz::Europe::London);
    }
}
