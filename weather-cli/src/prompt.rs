use std::io::{self, BufRead, IsTerminal, StdinLock, Stdout, Write};

use anyhow::{Context, Result};
use inquire::{InquireError, Text};

/// Line-oriented user input.
///
/// `Ok(None)` means the user closed the input (Esc, Ctrl-C, end of stream).
pub trait Prompter {
    fn ask(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Terminal prompts backed by `inquire`.
#[derive(Debug, Default)]
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        match Text::new(prompt).prompt() {
            Ok(answer) => Ok(Some(answer)),
            Err(
                InquireError::OperationCanceled
                | InquireError::OperationInterrupted
                | InquireError::NotTTY,
            ) => Ok(None),
            Err(err) => Err(err).context("Failed to read user input"),
        }
    }
}

/// Plain line reader for piped or redirected input.
#[derive(Debug)]
pub struct LinePrompter<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.out, "{prompt} ")?;
        self.out.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read user input")?;

        if read == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Picks `inquire` when stdin is a terminal, a line reader otherwise.
#[derive(Debug)]
pub enum StdinPrompter {
    Terminal(InquirePrompter),
    Piped(LinePrompter<StdinLock<'static>, Stdout>),
}

impl StdinPrompter {
    pub fn detect() -> Self {
        let stdin = io::stdin();
        if stdin.is_terminal() {
            StdinPrompter::Terminal(InquirePrompter)
        } else {
            StdinPrompter::Piped(LinePrompter::new(stdin.lock(), io::stdout()))
        }
    }
}

impl Prompter for StdinPrompter {
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        match self {
            StdinPrompter::Terminal(p) => p.ask(prompt),
            StdinPrompter::Piped(p) => p.ask(prompt),
        }
    }
}
