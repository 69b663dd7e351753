//! Interactive prompt for editing a register.
//!
//! One line is read, handled and rendered before the next is read.
//! Command errors are reported and the prompt continues.

mod command;
mod console;
mod session;

pub use command::{Command, CommandError, USAGE};
pub use console::{ColorMode, Console};
pub use session::{Response, Session, SessionError};

use std::io::{self, BufRead, Write};
use crate::register::format_offsets;

/// Prompt shown before each command.
pub const PROMPT: &str = ">>>";

/// Consecutive failed reads after which the prompt gives up.
const MAX_READ_FAILURES: usize = 3;

/// Run the prompt until `exit` or end of input.
pub fn run<R, W, E>(session: &mut Session, console: &mut Console<R, W, E>) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut read_failures = 0;

    loop {
        console.output("")?;
        let line = match console.ask(PROMPT) {
            Ok(Some(line)) => {
                read_failures = 0;
                line
            }
            Ok(None) => {
                tracing::debug!("end of input");
                console.output("")?;
                return Ok(());
            }
            Err(e) => {
                read_failures += 1;
                console.error(&format!("failed to read input: {}", e))?;
                if read_failures >= MAX_READ_FAILURES {
                    return Err(e);
                }
                continue;
            }
        };

        match session.handle_line(&line) {
            Ok(Response::Exit) => return Ok(()),
            Ok(response) => show(console, &response)?,
            Err(e) => {
                tracing::debug!(%line, error = %e, "command failed");
                console.error(&e.to_string())?;
            }
        }
    }
}

/// Print a command's response.
pub fn show<R, W, E>(console: &mut Console<R, W, E>, response: &Response) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    match response {
        Response::Usage => print_usage(console),
        Response::Rendering(rendering) => {
            for line in rendering.to_string().lines() {
                console.output(line)?;
            }
            Ok(())
        }
        Response::Offsets { target, offsets } => {
            let bit = if *target { 1 } else { 0 };
            if offsets.is_empty() {
                console.warn(&format!("no bit is {}", bit))
            } else {
                console.info(&format!("{}s at: {}", bit, format_offsets(offsets)))
            }
        }
        Response::Nothing | Response::Exit => Ok(()),
    }
}

fn print_usage<R, W, E>(console: &mut Console<R, W, E>) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    console.output("Usage:")?;
    for (invocation, description) in USAGE {
        console.output(&format!("  {:<20}: {}", invocation, description))?;
    }
    Ok(())
}
