//! The line-oriented IO seam for interactive elicitation.
//!
//! Queries never touch stdin/stdout directly; they talk to a [`Prompter`] so
//! the retry loops can be driven by a terminal in production and by canned
//! replies in tests.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// A blocking, line-oriented request/response channel to the human.
pub trait Prompter {
    /// Emit a line of output (announcements, warnings).
    fn say(&mut self, line: &str) -> io::Result<()>;

    /// Emit a prompt and block until a full reply line arrives.
    ///
    /// Returns the reply without its trailing newline. A channel that can no
    /// longer produce input (EOF) fails with [`io::ErrorKind::UnexpectedEof`].
    fn ask(&mut self, prompt: &str) -> io::Result<String>;
}

// ---------------------------------------------------------------------------
// Terminal prompter
// ---------------------------------------------------------------------------

/// A prompter backed by the process's stdin and stdout.
#[derive(Debug, Default)]
pub struct StdioPrompter;

impl StdioPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for StdioPrompter {
    fn say(&mut self, line: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{line}")
    }

    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{prompt}")?;
        stdout.flush()?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stdin closed while awaiting a reply",
            ));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

// ---------------------------------------------------------------------------
// Scripted prompter (for tests and non-interactive drivers)
// ---------------------------------------------------------------------------

/// A prompter that replays canned replies and records the exchange.
///
/// Each `ask` consumes the next scripted reply; running out of replies fails
/// with [`io::ErrorKind::UnexpectedEof`], like a closed terminal would.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    replies: VecDeque<String>,
    transcript: Vec<String>,
}

impl ScriptedPrompter {
    /// Create a prompter that will answer prompts with `replies`, in order.
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: replies.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    /// Everything said and asked so far, in order.
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// Number of scripted replies not yet consumed.
    pub fn remaining(&self) -> usize {
        self.replies.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn say(&mut self, line: &str) -> io::Result<()> {
        self.transcript.push(line.to_string());
        Ok(())
    }

    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        self.transcript.push(prompt.to_string());
        self.replies.pop_front().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "script exhausted while awaiting a reply",
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_prompter_replays_in_order() {
        let mut prompter = ScriptedPrompter::new(["first", "second"]);
        assert_eq!(prompter.ask("a? ").unwrap(), "first");
        assert_eq!(prompter.ask("b? ").unwrap(), "second");
        assert_eq!(prompter.transcript(), &["a? ".to_string(), "b? ".to_string()]);
    }

    #[test]
    fn exhausted_script_reports_eof() {
        let mut prompter = ScriptedPrompter::new(Vec::<String>::new());
        let err = prompter.ask("anything? ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
