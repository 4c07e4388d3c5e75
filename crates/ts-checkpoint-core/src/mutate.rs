//! In-place application of a file's edit plan.
//!
//! Owns the file's line buffer for the duration of one plan and splices
//! insertion blocks above target lines, highest line first. Because the
//! plan is sorted descending, lines below an insertion point shift down
//! without invalidating the sites still to come. Target lines themselves
//! are never altered.

use crate::comment::{
    self, CommentStyle, DecisionSource, SitePrompt, StyleDecision, StyleResolution,
};
use crate::config::Config;
use crate::error::ApplyResult;
use crate::events::{Event, Reporter, SkipReason};
use crate::plan::FilePlan;

/// One insertion that was applied to the buffer.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Insertion {
    /// 1-based line number of the target the block sits above.
    pub line: usize,
    /// The rendered comment lines, in buffer order.
    pub block: Vec<String>,
}

/// What happened while applying one file's plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct FileOutcome {
    /// Insertions applied, in plan (descending-line) order.
    pub insertions: Vec<Insertion>,
    /// Sites skipped because the directive was already present.
    pub already_suppressed: usize,
    /// Sites skipped because the report pointed past the end of the file.
    pub out_of_range: usize,
    /// Sites skipped by a `skip` answer at the disambiguation prompt.
    pub declined: usize,
}

impl FileOutcome {
    /// `true` if the buffer was not touched.
    pub fn is_unchanged(&self) -> bool {
        self.insertions.is_empty()
    }
}

/// Apply every site of `plan` to `buffer`, strictly in plan order.
///
/// Per site: out-of-range targets are dropped; a directive on the
/// preceding line makes the site a no-op (re-running the tool must not
/// stack suppressions); otherwise the comment style is resolved (asking
/// `decider` only when the markup heuristic fires) and the rendered block
/// is spliced immediately above the target index.
///
/// `files_remaining` is display-only status for the disambiguation prompt.
#[tracing::instrument(skip_all, fields(file = %plan.file, sites = plan.sites.len()))]
pub fn apply_plan(
    buffer: &mut Vec<String>,
    plan: &FilePlan,
    config: &Config,
    files_remaining: usize,
    decider: &mut dyn DecisionSource,
    reporter: &mut dyn Reporter,
) -> ApplyResult<FileOutcome> {
    reporter.report(Event::FileStarted { file: &plan.file, sites: plan.sites.len() });

    let mut outcome = FileOutcome::default();
    let suppression = format!(
        "{} {}: fix error and remove",
        config.directive, config.todo_prefix
    );

    for site in &plan.sites {
        // tsc reports 1-based lines; the buffer is 0-based. A site at
        // line 0 cannot come out of the parser, but treat it like any
        // other target that does not exist in the buffer.
        let Some(target) = site.line.checked_sub(1) else {
            outcome.out_of_range += 1;
            reporter.report(Event::SiteSkipped {
                file: &plan.file,
                line: site.line,
                reason: SkipReason::OutOfRange,
            });
            continue;
        };

        let Some(target_line) = buffer.get(target) else {
            tracing::warn!(file = %plan.file, line = site.line, "target line past end of file");
            outcome.out_of_range += 1;
            reporter.report(Event::SiteSkipped {
                file: &plan.file,
                line: site.line,
                reason: SkipReason::OutOfRange,
            });
            continue;
        };

        // Idempotency guard. Line 1 has no preceding line, which counts
        // as "no prior directive".
        if target > 0 && buffer[target - 1].contains(&config.directive) {
            outcome.already_suppressed += 1;
            reporter.report(Event::SiteSkipped {
                file: &plan.file,
                line: site.line,
                reason: SkipReason::AlreadySuppressed,
            });
            continue;
        }

        let indent = comment::leading_spaces(target_line);

        let window_start = target.saturating_sub(config.context);
        let window_end = (target + config.context).min(buffer.len());
        let context = &buffer[window_start..window_end];

        let style = match comment::resolve_style(&plan.file, context) {
            StyleResolution::Decided(style) => style,
            StyleResolution::NeedsDecision => {
                let prompt = SitePrompt {
                    file: &plan.file,
                    messages: &site.messages,
                    context,
                    target_offset: target - window_start,
                    files_remaining,
                };
                match decider.decide(&prompt)? {
                    StyleDecision::Plain => CommentStyle::Plain,
                    StyleDecision::Embedded => CommentStyle::Embedded,
                    StyleDecision::Skip => {
                        outcome.declined += 1;
                        reporter.report(Event::SiteSkipped {
                            file: &plan.file,
                            line: site.line,
                            reason: SkipReason::Declined,
                        });
                        continue;
                    }
                }
            }
        };

        let mut texts = site.messages.clone();
        texts.push(suppression.clone());
        let block = comment::render_block(style, &texts, indent);

        let shifted = target + block.len();
        buffer.splice(target..target, block.iter().cloned());

        reporter.report(Event::Inserted {
            file: &plan.file,
            line: site.line,
            block: &block,
            target: &buffer[shifted],
        });
        outcome.insertions.push(Insertion { line: site.line, block });
    }

    tracing::debug!(
        inserted = outcome.insertions.len(),
        already_suppressed = outcome.already_suppressed,
        out_of_range = outcome.out_of_range,
        declined = outcome.declined,
        "plan applied"
    );
    Ok(outcome)
}
