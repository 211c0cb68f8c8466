use tracing_subscriber::EnvFilter;

/// The binary, the calendar engine and the chronology framework.
const CRATE_TARGETS: &[&str] = &["bs", "bikram_sambat", "chronology_core"];

/// Installs the stderr subscriber for `bs`.
///
/// Without `-v` only the `TZ` fallback warning shows. `-v` adds the
/// `decomposing` line, `-vv` adds leap-table loading and each chronology the
/// registry builds, and `-vvv` traces the same targets. `RUST_LOG` replaces the
/// whole filter when set.
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let default_filter: String = CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",");

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
