//! Line-oriented console with colored message levels.

use std::io::{self, BufRead, Stderr, StdinLock, Stdout, Write};
use crossterm::style::{Color, ResetColor, Stylize};
use crossterm::tty::IsTty;

/// When to color console output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ColorMode {
    /// Color when stdout is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

/// Prompt reader and message writer.
///
/// Plain output and info go to `out`; warnings and errors go to `err`.
pub struct Console<R, W, E> {
    input: R,
    out: W,
    err: E,
    color: bool,
}

impl Console<StdinLock<'static>, Stdout, Stderr> {
    /// Console on the process's standard streams.
    pub fn stdio(mode: ColorMode) -> io::Result<Self> {
        let color = match mode {
            ColorMode::Auto => io::stdout().is_tty(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        };

        let mut out = io::stdout();
        if color {
            crossterm::execute!(out, ResetColor)?;
        }

        Ok(Self::new(io::stdin().lock(), out, io::stderr(), color))
    }
}

impl<R: BufRead, W: Write, E: Write> Console<R, W, E> {
    /// Console on arbitrary streams.
    pub fn new(input: R, out: W, err: E, color: bool) -> Self {
        Self { input, out, err, color }
    }

    /// Write a plain line.
    pub fn output(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)
    }

    /// Write a line in green.
    pub fn info(&mut self, text: &str) -> io::Result<()> {
        let line = self.paint(text, Color::Green);
        writeln!(self.out, "{}", line)
    }

    /// Write a line in yellow to the error stream.
    pub fn warn(&mut self, text: &str) -> io::Result<()> {
        let line = self.paint(text, Color::Yellow);
        writeln!(self.err, "{}", line)
    }

    /// Write a line in red to the error stream.
    pub fn error(&mut self, text: &str) -> io::Result<()> {
        let line = self.paint(text, Color::Red);
        writeln!(self.err, "{}", line)
    }

    /// Show `prompt` and read one line, without its line ending.
    ///
    /// Returns `None` at end of input.
    pub fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.out, "{} ", prompt)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Take back the output streams.
    pub fn into_inner(self) -> (W, E) {
        (self.out, self.err)
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.with(color).to_string()
        } else {
            text.to_string()
        }
    }
}
