//! Error types for ts-checkpoint-core.

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while applying an edit plan.
///
/// Malformed diagnostics, already-suppressed sites, and out-of-range sites
/// are not errors; each is handled locally as a silent (but reported) skip.
#[derive(Error, Debug)]
pub enum ApplyError {
    /// The decision source failed to produce an answer (e.g. stdin closed
    /// mid-prompt). Fatal to the run.
    #[error("markup disambiguation failed: {0}")]
    Decision(#[from] std::io::Error),
}

/// Result type alias using [`ApplyError`].
pub type ApplyResult<T> = Result<T, ApplyError>;
