//! Session state and command execution.

use thiserror::Error;
use crate::register::{self, BitRange, Register, RegisterError};
use crate::render::Rendering;
use super::command::{Command, CommandError};

/// What a command produced, for the console to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Usage text was requested.
    Usage,
    /// A value to show in all formats.
    Rendering(Rendering),
    /// Bit offsets matching a target value.
    Offsets { target: bool, offsets: Vec<usize> },
    /// Nothing to show.
    Nothing,
    /// The session should end.
    Exit,
}

/// An interactive session editing one register.
#[derive(Debug, Clone)]
pub struct Session {
    register: Register,
}

impl Session {
    /// Start a session on `register`.
    pub fn new(register: Register) -> Self {
        Self { register }
    }

    /// The register being edited.
    pub fn register(&self) -> &Register {
        &self.register
    }

    /// Parse and run one prompt line.
    pub fn handle_line(&mut self, line: &str) -> Result<Response, SessionError> {
        let command = Command::parse(line)?;
        self.execute(&command)
    }

    /// Run a command against the register.
    pub fn execute(&mut self, command: &Command) -> Result<Response, SessionError> {
        tracing::trace!(?command, "executing");
        let width = self.register.width();

        let response = match command {
            Command::Help => Response::Usage,
            Command::Print => self.render_all(),
            Command::Exit => Response::Exit,
            Command::Empty => Response::Nothing,
            Command::Value(value) => {
                let value = register::parse_unsigned(value)?;
                self.register.assign(value)?;
                self.render_all()
            }
            Command::Set(range) => {
                let range = BitRange::parse(range, width)?;
                self.register.set_range(range)?;
                self.render_all()
            }
            Command::Clear(range) => {
                let range = BitRange::parse(range, width)?;
                self.register.clear_range(range)?;
                self.render_all()
            }
            Command::Write { range, value } => {
                let range = BitRange::parse(range, width)?;
                let value = register::parse_int(value)?;
                self.register.write(range, value)?;
                self.render_all()
            }
            Command::List { target } => Response::Offsets {
                target: *target,
                offsets: self.register.offsets(*target),
            },
            Command::Field(range) => {
                let range = BitRange::parse(range, width)?;
                Response::Rendering(Rendering::of(&self.register.field(range)?))
            }
        };

        Ok(response)
    }

    fn render_all(&self) -> Response {
        Response::Rendering(Rendering::of(&self.register))
    }
}

/// Errors reported at the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Register(#[from] RegisterError),
}
