//! Errors produced by the register engine.

use thiserror::Error;

/// Errors that can occur when parsing input for, or editing, a register.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
    /// A number or bit string could not be parsed.
    #[error("invalid value '{input}': {reason}")]
    Parse { input: String, reason: String },

    /// A range expression was malformed or fell outside the register.
    #[error("invalid range '{input}': expected a bit or start:end within [0, {max}]")]
    InvalidRange { input: String, max: usize },

    /// A value does not fit in the field it is written to.
    #[error("value {value} does not fit in bits {range}: expected 0..={max}")]
    OutOfRange { value: i128, range: String, max: u64 },

    /// A value needs more bits than the register has.
    #[error("value {value:#x} does not fit in a {width}-bit register")]
    Overflow { value: u128, width: usize },

    /// The register width is not supported.
    #[error("register width must be between 1 and 64 bits, got {0}")]
    InvalidWidth(usize),
}

impl RegisterError {
    pub(crate) fn parse(input: &str, reason: impl Into<String>) -> Self {
        RegisterError::Parse {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
