//! Command line parsing for the interactive prompt.

use thiserror::Error;

/// A parsed prompt command.
///
/// Arguments are kept as text; they are validated against the register
/// when the command runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print usage.
    Help,
    /// Render the whole register.
    Print,
    /// Replace the whole register value.
    Value(String),
    /// Set the bits of a range to 1.
    Set(String),
    /// Clear the bits of a range to 0.
    Clear(String),
    /// Write a value into a range.
    Write { range: String, value: String },
    /// List the offsets of bits equal to the target.
    List { target: bool },
    /// Render the field named by a bare range token.
    Field(String),
    /// Leave the prompt.
    Exit,
    /// Blank line.
    Empty,
}

impl Command {
    /// Parse a line typed at the prompt.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(Command::Empty);
        };
        let args: Vec<&str> = words.collect();

        let cmd = match head {
            "help" | "h" => {
                expect_args("help", &args, 0)?;
                Command::Help
            }
            "print" | "p" => {
                expect_args("print", &args, 0)?;
                Command::Print
            }
            "exit" | "quit" | "q" => {
                expect_args("exit", &args, 0)?;
                Command::Exit
            }
            "value" | "v" => {
                expect_args("value", &args, 1)?;
                Command::Value(args[0].to_string())
            }
            "set" | "s" => {
                expect_args("set", &args, 1)?;
                Command::Set(args[0].to_string())
            }
            "clear" | "c" => {
                expect_args("clear", &args, 1)?;
                Command::Clear(args[0].to_string())
            }
            "write" | "w" => {
                expect_args("write", &args, 2)?;
                Command::Write {
                    range: args[0].to_string(),
                    value: args[1].to_string(),
                }
            }
            "list" | "l" => {
                let target = match args.as_slice() {
                    [] | ["1"] => true,
                    ["0"] => false,
                    [other] => return Err(CommandError::BadListTarget(other.to_string())),
                    _ => return Err(CommandError::UnexpectedArgument {
                        command: "list",
                        usage: usage_of("list"),
                    }),
                };
                Command::List { target }
            }
            _ => {
                // A bare range token; any trailing words are a mistake.
                if !args.is_empty() {
                    return Err(CommandError::UnknownCommand(line.trim().to_string()));
                }
                Command::Field(head.to_string())
            }
        };

        Ok(cmd)
    }
}

fn expect_args(command: &'static str, args: &[&str], count: usize) -> Result<(), CommandError> {
    if args.len() < count {
        return Err(CommandError::MissingArgument { command, usage: usage_of(command) });
    }
    if args.len() > count {
        return Err(CommandError::UnexpectedArgument { command, usage: usage_of(command) });
    }
    Ok(())
}

fn usage_of(command: &str) -> &'static str {
    USAGE
        .iter()
        .find(|(name, _)| name.split_whitespace().next() == Some(command))
        .map(|(name, _)| *name)
        .unwrap_or("")
}

/// Usage lines: invocation and description.
pub const USAGE: &[(&str, &str)] = &[
    ("help", "print this message (h)"),
    ("exit", "exit this program (quit, q)"),
    ("print", "print the register value (p)"),
    ("value <val>", "replace the register value (v)"),
    ("set <range>", "set the bits of a range to 1 (s)"),
    ("clear <range>", "clear the bits of a range to 0 (c)"),
    ("write <range> <val>", "write a value into a range (w)"),
    ("list [0|1]", "list offsets of set bits, or of clear bits with 0 (l)"),
    ("<range>", "print a bit or range of bits, like 21, 12:14 or 14:12"),
];

/// Errors in the shape of a command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("missing argument for '{command}', usage: {usage}")]
    MissingArgument { command: &'static str, usage: &'static str },

    #[error("too many arguments for '{command}', usage: {usage}")]
    UnexpectedArgument { command: &'static str, usage: &'static str },

    #[error("list expects 0 or 1, got '{0}'")]
    BadListTarget(String),

    #[error("unknown command: {0}")]
    UnknownCommand(String),
}
