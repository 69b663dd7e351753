//! Register value and bit field engine.
//!
//! This module provides:
//! - [`Register`] - A fixed-width unsigned value (1 to 64 bits)
//! - [`BitRange`] - An inclusive range of bit indices (LSB = bit 0)
//! - Integer literal parsing for decimal, hex, octal and binary input

mod error;
mod range;
mod word;
pub mod number;

pub use error::RegisterError;
pub use range::BitRange;
pub use word::{Register, format_offsets};
pub use number::{parse_int, parse_unsigned};
