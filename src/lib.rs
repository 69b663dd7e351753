//! # bitcalc
//!
//! An interactive calculator for fixed-width register values.
//!
//! A register holds an unsigned value of 1 to 64 bits. Bits and ranges of
//! bits can be read, set, cleared or overwritten, and every value is shown
//! in grouped binary, decimal and hexadecimal.

pub mod register;
pub mod render;

#[cfg(feature = "cli")]
pub mod repl;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use register::{BitRange, Register, RegisterError, parse_int, parse_unsigned};
pub use render::{decorate, Rendering};

#[cfg(feature = "cli")]
pub use repl::{Console, Session};
