//! Core library for ts-checkpoint.
//!
//! Converts a `tsc` diagnostic report into in-place source edits that
//! insert a suppression directive (plus the original error messages)
//! immediately above each reported error line. The pipeline:
//!
//! - [`diagnostics`] - parse raw report lines into [`Diagnostic`] records
//! - [`sample`] - optionally restrict to a uniform random subset
//! - [`plan`] - group per file and order sites by descending line number
//! - [`comment`] - pick comment syntax per site and render the block
//! - [`mutate`] - splice blocks into a file's line buffer, idempotently
//! - [`events`] - reporter seam for previews and traces
//!
//! File I/O, argument parsing, and the interactive prompt live in the
//! `ts-checkpoint` CLI crate; this crate only ever touches in-memory
//! line buffers (and, for [`config`], the config files it discovers).
//!
//! # Quick Start
//!
//! ```
//! use ts_checkpoint_core::{Config, apply_plan, build_plans, parse_report};
//! use ts_checkpoint_core::comment::{FixedDecision, StyleDecision};
//! use ts_checkpoint_core::events::NullReporter;
//!
//! let diags = parse_report("lib/x.ts(2,1): error TS7006: Parameter 'x' implicitly has an 'any' type.");
//! let plans = build_plans(&diags);
//!
//! let mut buffer: Vec<String> = ["function f(x) {", "  doThing(x);", "}"]
//!     .map(String::from)
//!     .to_vec();
//! let outcome = apply_plan(
//!     &mut buffer,
//!     &plans[0],
//!     &Config::default(),
//!     0,
//!     &mut FixedDecision(StyleDecision::Plain),
//!     &mut NullReporter,
//! )
//! .unwrap();
//! assert_eq!(outcome.insertions.len(), 1);
//! ```
#![deny(unsafe_code)]

pub mod comment;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod events;
pub mod mutate;
pub mod plan;
pub mod sample;

pub use config::{Config, ConfigLoader, LogLevel};
pub use diagnostics::{Diagnostic, parse_report};
pub use error::{ApplyError, ApplyResult, ConfigError, ConfigResult};
pub use mutate::{FileOutcome, Insertion, apply_plan};
pub use plan::{FilePlan, Site, build_plans};
pub use sample::sample;
