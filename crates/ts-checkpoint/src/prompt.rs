//! Interactive markup disambiguation.
//!
//! When the markup heuristic flags a site in a `.tsx`/`.jsx` file, a human
//! gets to pick the comment syntax. The prompt shows the file, the errors,
//! and the context window with the target line highlighted, then reads one
//! answer from stdin: empty keeps the plain `//` wrapper, `skip` leaves the
//! site alone, anything else switches to the `{/* */}` wrapper.

use std::io::{self, BufRead, IsTerminal, Write};

use owo_colors::{OwoColorize, Stream};
use ts_checkpoint_core::comment::{DecisionSource, SitePrompt, StyleDecision};

/// Decision source backed by the controlling terminal.
///
/// When stdin is not a terminal (CI, piped input) there is nobody to ask,
/// so every ambiguous site falls back to the plain wrapper without a prompt.
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl DecisionSource for StdinPrompt {
    fn decide(&mut self, prompt: &SitePrompt<'_>) -> io::Result<StyleDecision> {
        if !io::stdin().is_terminal() {
            tracing::debug!(file = %prompt.file, "non-interactive stdin, defaulting to plain comments");
            return Ok(StyleDecision::Plain);
        }

        println!(
            "{} {}",
            "File:".if_supports_color(Stream::Stdout, |h| h.magenta()),
            prompt.file
        );
        println!(
            "{} {} files remaining",
            "Status:".if_supports_color(Stream::Stdout, |h| h.cyan()),
            prompt.files_remaining
        );
        println!();

        println!("{}", "Errors:".if_supports_color(Stream::Stdout, |h| h.red()));
        for message in prompt.messages {
            println!(" - {message}");
        }
        println!();

        println!("{}", "Context:".if_supports_color(Stream::Stdout, |h| h.yellow()));
        for (idx, line) in prompt.context.iter().enumerate() {
            if idx == prompt.target_offset {
                println!(" > {}", line.if_supports_color(Stream::Stdout, |l| l.yellow()));
            } else {
                println!(" > {line}");
            }
        }
        println!();

        print!(
            "{} type anything for JSX, 'skip' to leave the site alone... ",
            "Format:".if_supports_color(Stream::Stdout, |h| h.blue())
        );
        io::stdout().flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        println!();

        Ok(parse_answer(&answer))
    }
}

/// Map a raw answer line to a decision.
fn parse_answer(answer: &str) -> StyleDecision {
    match answer.trim().to_lowercase().as_str() {
        "" => StyleDecision::Plain,
        "skip" => StyleDecision::Skip,
        _ => StyleDecision::Embedded,
    }
}
