//! Logging and tracing setup.
//!
//! All diagnostics go to stderr so stdout stays clean for previews,
//! prompts, and `--json` output. `RUST_LOG` wins over everything; absent
//! that, `-q`/`-v` override the configured log level.

use tracing_subscriber::EnvFilter;

/// Build the env filter from CLI flags and the configured level.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => config_level,
            1 => "debug",
            _ => "trace",
        }
    };

    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("ts_checkpoint={level},ts_checkpoint_core={level}"))
    })
}

/// Install the global subscriber. Call once at startup.
pub fn init(filter: EnvFilter) {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
