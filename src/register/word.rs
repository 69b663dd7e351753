//! The register being inspected and edited.

use std::fmt;
use serde::{Serialize, Deserialize};
use super::range::{low_mask, BitRange};
use super::RegisterError;

/// A fixed-width unsigned register value.
///
/// Bits above `width` are always zero, so [`Register::to_bit_string`]
/// always yields exactly `width` characters.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRegister")]
pub struct Register {
    width: usize,
    bits: u64,
}

/// Unchecked serialized form of a [`Register`].
#[derive(Deserialize)]
struct RawRegister {
    width: usize,
    bits: u64,
}

impl TryFrom<RawRegister> for Register {
    type Error = RegisterError;

    fn try_from(raw: RawRegister) -> Result<Self, Self::Error> {
        Register::with_value(raw.width, raw.bits as u128)
    }
}

impl Register {
    /// Width used when none is given.
    pub const DEFAULT_WIDTH: usize = 32;

    /// Widest supported register.
    pub const MAX_WIDTH: usize = 64;

    /// Create a zeroed register of `width` bits.
    pub fn new(width: usize) -> Result<Self, RegisterError> {
        if width == 0 || width > Self::MAX_WIDTH {
            return Err(RegisterError::InvalidWidth(width));
        }
        Ok(Self { width, bits: 0 })
    }

    /// Create a register holding `value`.
    pub fn with_value(width: usize, value: u128) -> Result<Self, RegisterError> {
        let mut register = Self::new(width)?;
        register.assign(value)?;
        Ok(register)
    }

    /// Build a register from a bit string written MSB first, like `"11110000"`.
    ///
    /// The register is as wide as the string.
    pub fn from_bit_str(s: &str) -> Result<Self, RegisterError> {
        let s = s.trim();
        if s.is_empty() || s.len() > Self::MAX_WIDTH {
            return Err(RegisterError::parse(
                s,
                format!("expected 1 to {} binary digits, got {}", Self::MAX_WIDTH, s.len()),
            ));
        }

        let mut bits = 0u64;
        for c in s.chars() {
            let bit = match c {
                '0' => 0,
                '1' => 1,
                _ => return Err(RegisterError::parse(s, format!("invalid binary digit '{}'", c))),
            };
            bits = (bits << 1) | bit;
        }

        Ok(Self { width: s.len(), bits })
    }

    /// Number of bits in the register.
    #[inline]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Unsigned value of the register.
    #[inline]
    pub const fn value(&self) -> u64 {
        self.bits
    }

    /// Get a single bit by index (0 = LSB).
    ///
    /// # Panics
    /// Panics if `index` is outside the register.
    pub fn get(&self, index: usize) -> bool {
        assert!(index < self.width, "Bit {} out of range (0-{})", index, self.width - 1);
        (self.bits >> index) & 1 == 1
    }

    /// Replace the whole value.
    ///
    /// Fails with [`RegisterError::Overflow`] if `value` needs more bits
    /// than the register has.
    pub fn assign(&mut self, value: u128) -> Result<(), RegisterError> {
        if value > low_mask(self.width) as u128 {
            return Err(RegisterError::Overflow { value, width: self.width });
        }
        self.bits = value as u64;
        tracing::debug!(width = self.width, value = self.bits, "register assigned");
        Ok(())
    }

    /// Read the bits of `range` as a register of `range.len()` bits.
    ///
    /// Fails with [`RegisterError::InvalidRange`] if `range` reaches past
    /// the register, as with every range operation below.
    pub fn field(&self, range: BitRange) -> Result<Register, RegisterError> {
        self.check(range)?;
        Ok(Register {
            width: range.len(),
            bits: (self.bits >> range.start()) & range.max_value(),
        })
    }

    /// Set every bit of `range` to 1.
    pub fn set_range(&mut self, range: BitRange) -> Result<(), RegisterError> {
        self.check(range)?;
        self.bits |= range.mask();
        tracing::debug!(%range, value = self.bits, "bits set");
        Ok(())
    }

    /// Clear every bit of `range` to 0.
    pub fn clear_range(&mut self, range: BitRange) -> Result<(), RegisterError> {
        self.check(range)?;
        self.bits &= !range.mask();
        tracing::debug!(%range, value = self.bits, "bits cleared");
        Ok(())
    }

    /// Write `value` into `range`.
    ///
    /// The least significant bit of `value` lands on `range.start()`.
    /// Fails with [`RegisterError::OutOfRange`] if `value` is negative or
    /// wider than the range.
    pub fn write(&mut self, range: BitRange, value: i128) -> Result<(), RegisterError> {
        self.check(range)?;
        let max = range.max_value();
        if value < 0 || value > max as i128 {
            return Err(RegisterError::OutOfRange {
                value,
                range: range.to_string(),
                max,
            });
        }
        let mask = range.mask();
        self.bits = (self.bits & !mask) | ((value as u64) << range.start());
        tracing::debug!(%range, field = value as u64, value = self.bits, "field written");
        Ok(())
    }

    fn check(&self, range: BitRange) -> Result<(), RegisterError> {
        if range.end() >= self.width {
            return Err(RegisterError::InvalidRange {
                input: range.to_string(),
                max: self.width - 1,
            });
        }
        Ok(())
    }

    /// Indices of the bits equal to `target`, in ascending order.
    pub fn offsets(&self, target: bool) -> Vec<usize> {
        (0..self.width).filter(|&i| self.get(i) == target).collect()
    }

    /// The register as a bit string, most significant bit first.
    pub fn to_bit_string(&self) -> String {
        format!("{:0width$b}", self.bits, width = self.width)
    }
}

impl Default for Register {
    fn default() -> Self {
        Self { width: Self::DEFAULT_WIDTH, bits: 0 }
    }
}

impl fmt::Debug for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Register{}(0b{} = {:#x})", self.width, self.to_bit_string(), self.bits)
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bit_string())
    }
}

/// Join bit offsets with commas, like `"0,3,7"`.
pub fn format_offsets(offsets: &[usize]) -> String {
    offsets
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(s: &str, width: usize) -> BitRange {
        BitRange::parse(s, width).unwrap()
    }

    #[test]
    fn test_new_rejects_bad_width() {
        assert_eq!(Register::new(0), Err(RegisterError::InvalidWidth(0)));
        assert_eq!(Register::new(65), Err(RegisterError::InvalidWidth(65)));
        assert_eq!(Register::new(64).unwrap().width(), 64);
        assert_eq!(Register::default().width(), Register::DEFAULT_WIDTH);
    }

    #[test]
    fn test_bit_string_is_full_width() {
        let reg = Register::with_value(32, 0x5).unwrap();
        assert_eq!(reg.to_bit_string(), "00000000000000000000000000000101");
        assert_eq!(reg.to_bit_string().len(), 32);
    }

    #[test]
    fn test_from_bit_str() {
        let reg = Register::from_bit_str("11110000").unwrap();
        assert_eq!(reg.width(), 8);
        assert_eq!(reg.value(), 0xf0);
        assert_eq!(reg.to_bit_string(), "11110000");

        assert!(matches!(Register::from_bit_str(""), Err(RegisterError::Parse { .. })));
        assert!(matches!(Register::from_bit_str("1021"), Err(RegisterError::Parse { .. })));
    }

    #[test]
    fn test_field_extraction() {
        let reg = Register::from_bit_str("11110000").unwrap();
        assert_eq!(reg.field(range("1:3", 8)).unwrap().to_bit_string(), "000");
        assert_eq!(reg.field(range("5:3", 8)).unwrap().to_bit_string(), "110");
        assert_eq!(reg.field(range("7", 8)).unwrap().to_bit_string(), "1");
        assert_eq!(reg.field(range("0:7", 8)).unwrap(), reg);
    }

    #[test]
    fn test_field_matches_string_span() {
        let reg = Register::from_bit_str("1011001110001111").unwrap();
        let text = reg.to_bit_string();
        for (a, b) in [(0, 0), (0, 15), (3, 9), (12, 15), (7, 7)] {
            let r = BitRange::new(a, b, 16).unwrap();
            assert_eq!(reg.field(r).unwrap().to_bit_string(), &text[r.string_span(16)]);
        }
    }

    #[test]
    fn test_set_and_clear() {
        let mut reg = Register::new(8).unwrap();
        reg.set_range(range("2:5", 8)).unwrap();
        assert_eq!(reg.to_bit_string(), "00111100");
        reg.set_range(range("2:5", 8)).unwrap();
        assert_eq!(reg.to_bit_string(), "00111100");
        reg.clear_range(range("3", 8)).unwrap();
        assert_eq!(reg.to_bit_string(), "00110100");
        reg.clear_range(range("0:7", 8)).unwrap();
        assert_eq!(reg.value(), 0);
    }

    #[test]
    fn test_write_field() {
        let mut reg = Register::from_bit_str("11111111").unwrap();
        reg.write(range("4:1", 8), 0b0101).unwrap();
        assert_eq!(reg.to_bit_string(), "11101011");

        reg.write(range("7", 8), 0).unwrap();
        assert_eq!(reg.to_bit_string(), "01101011");
    }

    #[test]
    fn test_write_out_of_range() {
        let mut reg = Register::new(32).unwrap();
        let r = range("4:7", 32);
        assert!(matches!(reg.write(r, 16), Err(RegisterError::OutOfRange { max: 15, .. })));
        assert!(matches!(reg.write(r, -1), Err(RegisterError::OutOfRange { .. })));
        assert!(reg.write(r, 15).is_ok());
        assert_eq!(reg.value(), 0xf0);
    }

    #[test]
    fn test_write_full_64_bits() {
        let mut reg = Register::new(64).unwrap();
        reg.write(BitRange::full(64).unwrap(), u64::MAX as i128).unwrap();
        assert_eq!(reg.value(), u64::MAX);
    }

    #[test]
    fn test_assign_overflow() {
        let mut reg = Register::new(8).unwrap();
        assert!(reg.assign(255).is_ok());
        assert_eq!(reg.assign(256), Err(RegisterError::Overflow { value: 256, width: 8 }));
        assert_eq!(reg.value(), 255);

        let mut wide = Register::new(64).unwrap();
        assert!(wide.assign(u64::MAX as u128).is_ok());
        assert!(wide.assign(u64::MAX as u128 + 1).is_err());
    }

    #[test]
    fn test_range_past_width_is_rejected() {
        let mut reg = Register::from_bit_str("1111").unwrap();
        let wide = range("2:5", 32);
        assert!(matches!(reg.field(wide), Err(RegisterError::InvalidRange { max: 3, .. })));
        assert!(matches!(reg.set_range(wide), Err(RegisterError::InvalidRange { .. })));
        assert!(matches!(reg.clear_range(wide), Err(RegisterError::InvalidRange { .. })));
        assert!(matches!(reg.write(wide, 0), Err(RegisterError::InvalidRange { .. })));
        assert_eq!(reg.to_bit_string(), "1111");
    }

    #[test]
    fn test_deserialize_checks_invariants() {
        let reg: Register = serde_json::from_str(r#"{"width":8,"bits":240}"#).unwrap();
        assert_eq!(reg.to_bit_string(), "11110000");
        assert_eq!(serde_json::to_string(&reg).unwrap(), r#"{"width":8,"bits":240}"#);

        assert!(serde_json::from_str::<Register>(r#"{"width":8,"bits":1024}"#).is_err());
        assert!(serde_json::from_str::<Register>(r#"{"width":0,"bits":0}"#).is_err());
        assert!(serde_json::from_str::<Register>(r#"{"width":65,"bits":0}"#).is_err());
    }

    #[test]
    fn test_offsets() {
        let reg = Register::from_bit_str("10010110").unwrap();
        assert_eq!(reg.offsets(true), vec![1, 2, 4, 7]);
        assert_eq!(reg.offsets(false), vec![0, 3, 5, 6]);
        assert_eq!(format_offsets(&reg.offsets(true)), "1,2,4,7");
        assert_eq!(format_offsets(&Register::new(4).unwrap().offsets(true)), "");
    }
}
