//! Run events and the reporter seam.
//!
//! Components never print or log directly; they hand [`Event`]s to a
//! [`Reporter`] passed in by the caller. The CLI attaches a console
//! implementation, tests attach [`NullReporter`] or a recording stub.
//! Reporters are observational only and never affect control flow.

use camino::Utf8Path;

/// Why a planned insertion site was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The preceding line already carries the suppression directive.
    AlreadySuppressed,
    /// The report names a line past the end of the file.
    OutOfRange,
    /// The decision source chose to skip the site.
    Declined,
}

/// Something the pipeline did (or decided not to do).
#[derive(Debug)]
pub enum Event<'a> {
    /// Processing of one file's plan began.
    FileStarted {
        /// File about to be edited.
        file: &'a Utf8Path,
        /// Number of insertion sites in its plan.
        sites: usize,
    },
    /// An insertion block was spliced above a target line (or would be,
    /// in preview mode — the in-memory buffer is mutated either way).
    Inserted {
        /// File being edited.
        file: &'a Utf8Path,
        /// 1-based target line number from the report.
        line: usize,
        /// The rendered comment lines that were inserted.
        block: &'a [String],
        /// Content of the original target line, unchanged.
        target: &'a str,
    },
    /// A site was skipped without mutation.
    SiteSkipped {
        /// File being edited.
        file: &'a Utf8Path,
        /// 1-based target line number from the report.
        line: usize,
        /// Why nothing was inserted.
        reason: SkipReason,
    },
    /// A file's buffer was written back to disk.
    FileWritten {
        /// File that was persisted.
        file: &'a Utf8Path,
    },
}

/// Sink for pipeline events.
pub trait Reporter {
    /// Observe one event.
    fn report(&mut self, event: Event<'_>);
}

/// Reporter that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&mut self, _event: Event<'_>) {}
}
