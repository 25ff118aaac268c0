//! Logging setup for the CLI
//!
//! Maps the -v/-q flags to a tracing level, honors RUST_LOG overrides, and
//! sends everything to stderr so stdout stays clean for the reports the
//! tools print.

use crate::error::{Error, Result};
use tracing_subscriber::EnvFilter;

/// Default level for a given verbosity count
fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize the global tracing subscriber
pub fn init_logging(verbosity: u8, quiet: bool) -> Result<()> {
    let default_level = if quiet { "error" } else { level_for(verbosity) };

    // RUST_LOG takes precedence over the flag-derived level.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbosity >= 2)
        .try_init()
        .map_err(|e| Error::config(format!("failed to initialize logging: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for(0), "warn");
        assert_eq!(level_for(1), "info");
        assert_eq!(level_for(2), "debug");
        assert_eq!(level_for(5), "trace");
    }
}
