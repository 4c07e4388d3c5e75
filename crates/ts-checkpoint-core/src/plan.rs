//! Per-file edit planning.
//!
//! Groups diagnostics by file, merges diagnostics that target the same
//! line, and orders each file's insertion sites by descending line number.
//! The descending order is load-bearing: splicing lines above a site shifts
//! every later line down, so visiting highest-numbered sites first keeps
//! the remaining (lower) line numbers valid without recomputation.

use camino::Utf8PathBuf;
use indexmap::IndexMap;

use crate::diagnostics::Diagnostic;

/// One insertion site within a file: a target line plus every message
/// reported against it, in encounter order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    /// 1-based target line number.
    pub line: usize,
    /// Messages of all diagnostics reported on this line.
    pub messages: Vec<String>,
}

/// The ordered edit plan for one file.
///
/// Sites are sorted by descending line number and line numbers are
/// distinct (same-line diagnostics merge into one site).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePlan {
    /// Path of the file to edit, as reported by the compiler.
    pub file: Utf8PathBuf,
    /// Insertion sites, highest line first.
    pub sites: Vec<Site>,
}

/// Build per-file edit plans from a diagnostic set.
///
/// Files appear in first-seen order, which fixes the processing order of
/// the run (observable in prompts and logs, not in correctness).
#[tracing::instrument(skip_all, fields(diagnostics = diagnostics.len()))]
pub fn build_plans(diagnostics: &[Diagnostic]) -> Vec<FilePlan> {
    let mut by_file: IndexMap<&Utf8PathBuf, IndexMap<usize, Vec<String>>> = IndexMap::new();

    for diag in diagnostics {
        by_file
            .entry(&diag.file)
            .or_default()
            .entry(diag.line)
            .or_default()
            .push(diag.message.clone());
    }

    let plans: Vec<FilePlan> = by_file
        .into_iter()
        .map(|(file, by_line)| {
            let mut sites: Vec<Site> = by_line
                .into_iter()
                .map(|(line, messages)| Site { line, messages })
                .collect();
            sites.sort_by(|a, b| b.line.cmp(&a.line));
            FilePlan { file: file.clone(), sites }
        })
        .collect();

    tracing::debug!(files = plans.len(), "built edit plans");
    plans
}
