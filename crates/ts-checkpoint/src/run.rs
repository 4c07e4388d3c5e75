//! The report-to-edits pipeline.
//!
//! Reads the diagnostic report, parses and (optionally) samples it, builds
//! per-file edit plans, then processes files strictly in series: read the
//! file into a line buffer, apply the plan, write the buffer back (unless
//! `--dry`). Within a file, sites are applied highest line first; nothing
//! runs in parallel, by design.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use tracing::{debug, info, instrument};

use ts_checkpoint_core::comment::DecisionSource;
use ts_checkpoint_core::events::{Event, Reporter, SkipReason};
use ts_checkpoint_core::{Config, apply_plan, build_plans, parse_report, sample};

/// Flags controlling one run, resolved from the CLI surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Preview only; mutate buffers but never write files.
    pub dry: bool,
    /// Restrict processing to this many uniformly sampled diagnostics.
    pub sample: Option<usize>,
}

/// Per-file results for the run summary.
#[derive(Debug, Clone, Serialize)]
pub struct FileSummary {
    /// File that was processed.
    pub file: Utf8PathBuf,
    /// Number of insertion blocks applied.
    pub inserted: usize,
    /// Sites skipped because the directive was already there.
    pub already_suppressed: usize,
    /// Sites skipped because the report pointed past the end of the file.
    pub out_of_range: usize,
    /// Sites skipped at the disambiguation prompt.
    pub declined: usize,
}

/// Machine-readable account of one run, printed by `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Diagnostics parsed from the report.
    pub diagnostics: usize,
    /// Diagnostics actually processed (after sampling).
    pub processed: usize,
    /// Whether this was a preview-only run.
    pub dry: bool,
    /// Effective configuration for the run.
    pub config: Config,
    /// Per-file outcomes, in processing order.
    pub files: Vec<FileSummary>,
}

impl RunSummary {
    /// Total insertions across all files.
    pub fn inserted(&self) -> usize {
        self.files.iter().map(|f| f.inserted).sum()
    }
}

/// Execute one full run against `report_path`.
///
/// Read and write failures are fatal: they abort the run where they
/// happen, leaving files written in earlier iterations in place. There is
/// no rollback across files.
#[instrument(skip_all, fields(report = %report_path))]
pub fn run(
    report_path: &Utf8Path,
    config: &Config,
    options: RunOptions,
    decider: &mut dyn DecisionSource,
    reporter: &mut dyn Reporter,
) -> anyhow::Result<RunSummary> {
    let report = read_file(report_path)?;
    let diagnostics = parse_report(&report);
    info!(count = diagnostics.len(), "parsed diagnostic report");

    let processed = match options.sample {
        Some(n) if n < diagnostics.len() => sample(&diagnostics, n),
        Some(n) => {
            if n > diagnostics.len() {
                tracing::warn!(
                    requested = n,
                    available = diagnostics.len(),
                    "sample size exceeds diagnostic count, using all"
                );
            }
            diagnostics.clone()
        }
        None => diagnostics.clone(),
    };

    let plans = build_plans(&processed);
    let mut files = Vec::with_capacity(plans.len());

    for (idx, plan) in plans.iter().enumerate() {
        let mut buffer = read_lines(&plan.file)?;

        let files_remaining = plans.len() - idx - 1;
        let outcome = apply_plan(&mut buffer, plan, config, files_remaining, decider, reporter)?;

        if options.dry {
            debug!(file = %plan.file, "dry run, discarding buffer");
        } else if outcome.is_unchanged() {
            debug!(file = %plan.file, "no insertions, leaving file untouched");
        } else {
            write_lines(&plan.file, &buffer)?;
            reporter.report(Event::FileWritten { file: &plan.file });
        }

        files.push(FileSummary {
            file: plan.file.clone(),
            inserted: outcome.insertions.len(),
            already_suppressed: outcome.already_suppressed,
            out_of_range: outcome.out_of_range,
            declined: outcome.declined,
        });
    }

    Ok(RunSummary {
        diagnostics: diagnostics.len(),
        processed: processed.len(),
        dry: options.dry,
        config: config.clone(),
        files,
    })
}

/// Read a whole file, logging the failure before propagating it.
fn read_file(path: &Utf8Path) -> anyhow::Result<String> {
    info!(%path, "reading");
    std::fs::read_to_string(path.as_std_path())
        .inspect_err(|err| tracing::error!(%path, error = %err, "read failed"))
        .with_context(|| format!("failed to read {path}"))
}

/// Read a file into a line buffer.
///
/// Split on `\n`, not `lines()`: a trailing newline becomes a trailing
/// empty segment, so joining the buffer back reproduces the original
/// byte-for-byte.
fn read_lines(path: &Utf8Path) -> anyhow::Result<Vec<String>> {
    Ok(read_file(path)?.split('\n').map(String::from).collect())
}

/// Write a line buffer back, logging the failure before propagating it.
fn write_lines(path: &Utf8Path, lines: &[String]) -> anyhow::Result<()> {
    info!(%path, "writing");
    std::fs::write(path.as_std_path(), lines.join("\n"))
        .inspect_err(|err| tracing::error!(%path, error = %err, "write failed"))
        .with_context(|| format!("failed to write {path}"))
}

/// Console reporter: renders the pseudo-diff preview of each insertion and
/// a note for every skipped site.
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    /// Print insertion previews (enabled by `--dry` and `-v`).
    pub preview: bool,
}

impl Reporter for ConsoleReporter {
    fn report(&mut self, event: Event<'_>) {
        match event {
            Event::FileStarted { file, sites } => {
                debug!(%file, sites, "processing file");
            }
            Event::Inserted { file, line, block, target } => {
                if self.preview {
                    println!("{}", file.if_supports_color(Stream::Stdout, |f| f.magenta()));
                    for (idx, inserted) in block.iter().enumerate() {
                        println!(
                            " {}: {}",
                            line + idx,
                            inserted.if_supports_color(Stream::Stdout, |i| i.green())
                        );
                    }
                    println!(
                        " {}: {}\n",
                        line + block.len(),
                        target.if_supports_color(Stream::Stdout, |t| t.yellow())
                    );
                }
            }
            Event::SiteSkipped { file, line, reason } => {
                let why = match reason {
                    SkipReason::AlreadySuppressed => "already suppressed",
                    SkipReason::OutOfRange => "line past end of file",
                    SkipReason::Declined => "skipped at prompt",
                };
                if self.preview {
                    println!(
                        "{} {file}:{line} ({why})\n",
                        "skip:".if_supports_color(Stream::Stdout, |s| s.dimmed())
                    );
                }
            }
            Event::FileWritten { file } => {
                debug!(%file, "written");
            }
        }
    }
}

/// Print the human-readable closing line for a run.
pub fn print_summary(summary: &RunSummary) {
    let inserted = summary.inserted();
    let files = summary.files.len();
    if summary.dry {
        println!(
            "{} would insert {inserted} suppression block(s) across {files} file(s)",
            "dry run:".if_supports_color(Stream::Stdout, |d| d.cyan())
        );
    } else {
        println!(
            "{} inserted {inserted} suppression block(s) across {files} file(s)",
            "done:".if_supports_color(Stream::Stdout, |d| d.green())
        );
    }
}
