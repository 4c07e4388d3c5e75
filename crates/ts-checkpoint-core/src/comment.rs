//! Comment syntax selection and insertion-block rendering.
//!
//! Plain TypeScript takes a `//` line comment. Inside JSX markup that same
//! comment would be rendered as text, so the block has to use the
//! `{/* ... */}` form instead. Whether a given site sits inside markup is
//! not decidable from one line, so for `.tsx`/`.jsx` files we run a cheap
//! lexical heuristic over a context window and, when it fires, defer to an
//! injected decision source (interactive in the CLI, a stub in tests).

use std::io;
use std::sync::LazyLock;

use camino::Utf8Path;
use regex::Regex;

/// Lexical markup sniff: tag open after a non-word char, self-closing tag,
/// closing tag, or attribute-expression opener. A coarse guess on purpose;
/// false positives are resolved by the decision source.
static MARKUP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^\w]<\w+)|(/>)|(</)|(=\{)").expect("valid regex"));

/// Comment wrapper applied to every line of an insertion block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// `// text` — ordinary line comment.
    Plain,
    /// `{/* text */}` — comment embedded in JSX markup.
    Embedded,
}

impl CommentStyle {
    /// Wrap a single text in this comment syntax.
    pub fn wrap(self, text: &str) -> String {
        match self {
            Self::Plain => format!("// {text}"),
            Self::Embedded => format!("{{/* {text} */}}"),
        }
    }
}

/// Outcome of a markup disambiguation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleDecision {
    /// Use the plain line-comment wrapper.
    Plain,
    /// Use the markup-embedded wrapper.
    Embedded,
    /// Emit no insertion for this site at all.
    Skip,
}

/// Everything a decision source gets to show a human (or a test stub)
/// before it picks a [`StyleDecision`] for an ambiguous site.
#[derive(Debug)]
pub struct SitePrompt<'a> {
    /// File being edited.
    pub file: &'a Utf8Path,
    /// Diagnostic messages reported at the site.
    pub messages: &'a [String],
    /// The context window around the target line.
    pub context: &'a [String],
    /// Index of the target line within `context`.
    pub target_offset: usize,
    /// How many files remain after the current one.
    pub files_remaining: usize,
}

/// Resolves ambiguous comment-syntax sites.
///
/// The production implementation prompts on the terminal; tests inject a
/// deterministic function. A source may fail (e.g. stdin closed), which
/// aborts the run.
pub trait DecisionSource {
    /// Choose the comment style for the prompted site.
    fn decide(&mut self, prompt: &SitePrompt<'_>) -> io::Result<StyleDecision>;
}

/// A decision source that always returns the same answer. Handy for tests
/// and for non-interactive batch runs.
#[derive(Debug, Clone, Copy)]
pub struct FixedDecision(pub StyleDecision);

impl DecisionSource for FixedDecision {
    fn decide(&mut self, _prompt: &SitePrompt<'_>) -> io::Result<StyleDecision> {
        Ok(self.0)
    }
}

/// How the comment style for a site gets settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleResolution {
    /// The style is determined by the file alone; no human needed.
    Decided(CommentStyle),
    /// Markup-capable file with markup-looking context: ask the source.
    NeedsDecision,
}

/// Decide the comment style for a site, or flag it for disambiguation.
///
/// Only `.tsx`/`.jsx` files can embed markup; everything else takes the
/// plain wrapper. Within a markup-capable file the heuristic must also see
/// a tag-like token somewhere in the context window before we bother
/// anyone with a prompt.
pub fn resolve_style(file: &Utf8Path, context: &[String]) -> StyleResolution {
    if !matches!(file.extension(), Some("tsx" | "jsx")) {
        return StyleResolution::Decided(CommentStyle::Plain);
    }
    if !context.iter().any(|line| MARKUP_PATTERN.is_match(line)) {
        return StyleResolution::Decided(CommentStyle::Plain);
    }
    StyleResolution::NeedsDecision
}

/// Render the insertion block for one site.
///
/// Each text becomes one line, wrapped in `style` and indented to match
/// the target line's own leading-space count.
pub fn render_block(style: CommentStyle, texts: &[String], indent: usize) -> Vec<String> {
    texts
        .iter()
        .map(|text| format!("{}{}", " ".repeat(indent), style.wrap(text)))
        .collect()
}

/// Leading-space count of a line, used to align inserted comments.
pub fn leading_spaces(line: &str) -> usize {
    line.chars().take_while(|&c| c == ' ').count()
}
