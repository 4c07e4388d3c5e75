//! Diagnostic report parsing.
//!
//! Turns the raw text of a `tsc` report into structured [`Diagnostic`]
//! records. One diagnostic per line, in the shape:
//!
//! ```text
//! src/app.ts(12,5): error TS2322: Type 'string' is not assignable to type 'number'.
//! ```
//!
//! Lines that do not match (summary lines, blank lines, notes) are dropped
//! without comment; the report format interleaves them freely.

use std::sync::LazyLock;

use camino::Utf8PathBuf;
use regex::Regex;

/// Regex for one `tsc` diagnostic line: `<path>(<line>,<col>): error TS<n>: <message>`.
static DIAGNOSTIC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<path>[^(]+)\((?P<line>\d+),(?P<col>\d+)\): error (?P<code>TS\d+): (?P<message>.*)$")
        .expect("valid regex")
});

/// One reported type error, as emitted by the compiler.
///
/// Line and column are 1-based, matching `tsc` output. Conversion to
/// 0-based buffer indices happens only at mutation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Path of the file the error was reported in, as written in the report.
    pub file: Utf8PathBuf,
    /// 1-based line number of the error.
    pub line: usize,
    /// 1-based column number of the error.
    pub column: usize,
    /// Error code, e.g. `TS2322`.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Parse a raw report into diagnostics, preserving input order.
///
/// Lines that fail the pattern, or whose line/column capture does not fit
/// a `usize`, contribute nothing. This is deliberate: a `tsc` report mixes
/// diagnostics with elaboration lines and a trailing error count.
#[tracing::instrument(skip_all, fields(report_len = report.len()))]
pub fn parse_report(report: &str) -> Vec<Diagnostic> {
    let diagnostics: Vec<Diagnostic> = report.lines().filter_map(parse_line).collect();
    tracing::debug!(count = diagnostics.len(), "parsed diagnostics");
    diagnostics
}

/// Parse a single report line, or `None` if it is not a diagnostic.
///
/// tsc lines and columns start at 1; a captured 0 is garbage and the
/// line is dropped like any other mismatch.
fn parse_line(line: &str) -> Option<Diagnostic> {
    let caps = DIAGNOSTIC_PATTERN.captures(line)?;
    Some(Diagnostic {
        file: Utf8PathBuf::from(&caps["path"]),
        line: caps["line"].parse().ok().filter(|&n| n >= 1)?,
        column: caps["col"].parse().ok().filter(|&n| n >= 1)?,
        code: caps["code"].to_string(),
        message: caps["message"].to_string(),
    })
}
