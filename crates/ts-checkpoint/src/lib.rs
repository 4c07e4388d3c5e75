//! Library interface for the `ts-checkpoint` CLI.
//!
//! This crate exposes the CLI's argument parser and the run pipeline as a
//! library for integration testing. The actual entry point is in `main.rs`.
//!
//! # Structure
//!
//! - [`Cli`] - The root argument parser (clap derive)
//! - [`run`] - Report-to-edits pipeline and console reporting
//! - [`prompt`] - Interactive markup disambiguation

pub mod prompt;
pub mod run;

use camino::Utf8PathBuf;
use clap::Parser;
use std::path::PathBuf;

/// Color output preference.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect terminal capabilities automatically.
    #[default]
    Auto,
    /// Always emit colors.
    Always,
    /// Never emit colors.
    Never,
}

impl ColorChoice {
    /// Configure global color output based on this choice.
    ///
    /// Call this once at startup to set the color mode.
    pub fn apply(self) {
        match self {
            Self::Auto => {} // owo-colors auto-detects by default
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }
}

const ENV_HELP: &str = "\
ENVIRONMENT VARIABLES:
    RUST_LOG                    Log filter (e.g., debug, ts-checkpoint=trace)
    TS_CHECKPOINT_DIRECTIVE     Suppression directive token
    TS_CHECKPOINT_TODO_PREFIX   Prefix word for the fix-and-remove note
    TS_CHECKPOINT_CONTEXT       Context window half-width for the markup heuristic
";

/// Command-line interface definition for ts-checkpoint.
#[derive(Parser)]
#[command(name = "ts-checkpoint")]
#[command(
    about = "Insert traceable @ts-expect-error suppressions above every error in a tsc report",
    long_about = None
)]
#[command(version, arg_required_else_help = true)]
#[command(after_long_help = ENV_HELP)]
pub struct Cli {
    /// Path to the tsc diagnostic report file
    #[arg(value_name = "REPORT", required_unless_present = "version_only")]
    pub report: Option<Utf8PathBuf>,

    /// Preview the edits without writing any file
    #[arg(long)]
    pub dry: bool,

    /// Prefix word for the synthesized fix-and-remove note
    #[arg(long, value_name = "WORD")]
    pub todo: Option<String>,

    /// Lines of context on each side of a target line for the markup heuristic
    #[arg(long, value_name = "N")]
    pub context: Option<usize>,

    /// Checkpoint only a uniformly random subset of this many diagnostics
    #[arg(long, value_name = "N")]
    pub sample: Option<usize>,

    /// Print only the version number (for scripting)
    #[arg(long)]
    pub version_only: bool,

    /// Path to configuration file (overrides discovery)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run as if started in DIR
    #[arg(short = 'C', long, global = true)]
    pub chdir: Option<PathBuf>,

    /// Only print errors (suppresses warnings/info)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// More detail (repeatable; e.g. -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Colorize output
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// Output the run summary as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,
}
