//! Binary, decimal and hexadecimal rendering of register values.

use std::fmt;
use serde::{Serialize, Deserialize};
use crate::register::Register;

/// Group a bit string into nibbles from the least significant end.
///
/// `"110101010"` becomes `"1,1010,1010"`.
pub fn decorate(bits: &str) -> String {
    let len = bits.len();
    let mut out = String::with_capacity(len + len / 4);
    for (i, c) in bits.chars().enumerate() {
        if i != 0 && (len - i) % 4 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// A value shown in all three formats.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rendering {
    /// Bit string grouped in nibbles.
    pub binary: String,
    /// Unsigned decimal value.
    pub decimal: u64,
    /// Lowercase hex with a `0x` prefix.
    pub hex: String,
}

impl Rendering {
    /// Render a register or field.
    pub fn of(register: &Register) -> Self {
        Self {
            binary: decorate(&register.to_bit_string()),
            decimal: register.value(),
            hex: format!("{:#x}", register.value()),
        }
    }
}

impl fmt::Display for Rendering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "bin: {}", self.binary)?;
        writeln!(f, "dec: {}", self.decimal)?;
        write!(f, "hex: {}", self.hex)
    }
}
