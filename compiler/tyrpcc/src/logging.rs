//! Tracing subscriber setup.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable consulted before `RUST_LOG`.
pub const LOG_ENV: &str = "TYRPC_LOG";

const DEFAULT_FILTER: &str = "warn";

static TRACING_INIT: Once = Once::new();

/// Pick the filter directive: the `--log` flag, then `TYRPC_LOG`, then
/// `RUST_LOG`, then `warn`. Blank sources are skipped.
pub fn filter_directive(
    flag: Option<&str>,
    tyrpc_log: Option<String>,
    rust_log: Option<String>,
) -> String {
    fn set(directive: Option<String>) -> Option<String> {
        directive.filter(|directive| !directive.trim().is_empty())
    }

    set(flag.map(str::to_string))
        .or_else(|| set(tyrpc_log))
        .or_else(|| set(rust_log))
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Install the global subscriber, logging to stderr. Safe to call more than
/// once; only the first call has an effect.
pub fn init(flag: Option<&str>) {
    TRACING_INIT.call_once(|| {
        let directive = filter_directive(
            flag,
            std::env::var(LOG_ENV).ok(),
            std::env::var("RUST_LOG").ok(),
        );
        let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| {
            eprintln!("warning: invalid log filter `{directive}`, using `{DEFAULT_FILTER}`");
            EnvFilter::new(DEFAULT_FILTER)
        });

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(filter)
            .try_init();
    });
}
