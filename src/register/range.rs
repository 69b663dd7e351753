//! Inclusive bit ranges.
//!
//! A range names bits by index, counted from the least significant bit
//! (index 0). It is written either as a single bit (`7`) or as two bounds
//! separated by a colon (`4:7`); the bounds may be given in either order.

use std::fmt;
use std::ops::RangeInclusive;
use serde::{Serialize, Deserialize};
use super::{number, Register, RegisterError};

/// An inclusive interval of bit indices, always normalized so `start <= end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct BitRange {
    start: usize,
    end: usize,
}

/// Unchecked serialized form of a [`BitRange`].
#[derive(Deserialize)]
struct RawRange {
    start: usize,
    end: usize,
}

impl TryFrom<RawRange> for BitRange {
    type Error = RegisterError;

    /// Normalizes the bounds and limits them to the widest register.
    fn try_from(raw: RawRange) -> Result<Self, Self::Error> {
        BitRange::new(raw.start, raw.end, Register::MAX_WIDTH)
    }
}

impl BitRange {
    /// Create a range from two bounds in any order.
    ///
    /// Fails if either bound is not a bit of a `width`-bit register.
    pub fn new(a: usize, b: usize, width: usize) -> Result<Self, RegisterError> {
        let (start, end) = if a > b { (b, a) } else { (a, b) };
        if end >= width {
            return Err(RegisterError::InvalidRange {
                input: format!("{}:{}", a, b),
                max: width.saturating_sub(1),
            });
        }
        Ok(Self { start, end })
    }

    /// Create a range covering a single bit.
    pub fn bit(index: usize, width: usize) -> Result<Self, RegisterError> {
        Self::new(index, index, width)
    }

    /// Create a range covering every bit of a `width`-bit register.
    pub fn full(width: usize) -> Result<Self, RegisterError> {
        Self::new(0, width.saturating_sub(1), width)
    }

    /// Parse a range expression like `"3"`, `"12:14"` or `"14:12"`.
    pub fn parse(input: &str, width: usize) -> Result<Self, RegisterError> {
        let invalid = || RegisterError::InvalidRange {
            input: input.trim().to_string(),
            max: width.saturating_sub(1),
        };

        let text = input.trim();
        if text.is_empty() {
            return Err(invalid());
        }

        let bound = |token: &str| -> Result<usize, RegisterError> {
            let value = number::parse_int(token).map_err(|_| invalid())?;
            usize::try_from(value).map_err(|_| invalid())
        };

        let (a, b) = match text.split_once(':') {
            Some((_, rest)) if rest.contains(':') => return Err(invalid()),
            Some((first, second)) => (bound(first)?, bound(second)?),
            None => {
                let index = bound(text)?;
                (index, index)
            }
        };

        Self::new(a, b, width).map_err(|_| invalid())
    }

    /// Lowest bit index in the range.
    #[inline]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Highest bit index in the range.
    #[inline]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Number of bits covered.
    #[inline]
    pub const fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// A range always covers at least one bit.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Largest value the range can hold: `2^len - 1`.
    pub fn max_value(&self) -> u64 {
        low_mask(self.len())
    }

    /// Mask selecting the range's bits in place.
    pub fn mask(&self) -> u64 {
        self.max_value() << self.start
    }

    /// Check whether a bit index falls in the range.
    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }

    /// Character positions covered by the range in a `width`-character
    /// bit string written most significant bit first.
    ///
    /// # Panics
    /// Panics if the range reaches past `width` bits.
    pub fn string_span(&self, width: usize) -> RangeInclusive<usize> {
        assert!(self.end < width, "Range {} out of range for {} bits", self, width);
        (width - 1 - self.end)..=(width - 1 - self.start)
    }
}

impl fmt::Display for BitRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "[{}]", self.start)
        } else {
            write!(f, "[{}:{}]", self.start, self.end)
        }
    }
}

/// Mask with the low `bits` bits set.
pub(crate) fn low_mask(bits: usize) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_bit() {
        let range = BitRange::parse("3", 32).unwrap();
        assert_eq!((range.start(), range.end()), (3, 3));
        assert_eq!(range.len(), 1);
    }

    #[test]
    fn test_bounds_any_order() {
        assert_eq!(BitRange::parse("3:0", 32).unwrap(), BitRange::new(0, 3, 32).unwrap());
        assert_eq!(BitRange::parse("1:4", 32).unwrap(), BitRange::new(1, 4, 32).unwrap());
        assert_eq!(BitRange::parse("14:12", 32).unwrap(), BitRange::parse("12:14", 32).unwrap());
    }

    #[test]
    fn test_prefixed_bounds() {
        let range = BitRange::parse("0x4:0x1f", 32).unwrap();
        assert_eq!((range.start(), range.end()), (4, 31));
        let range = BitRange::parse(" 010 ", 32).unwrap();
        assert_eq!((range.start(), range.end()), (8, 8));
    }

    #[test]
    fn test_rejects_invalid() {
        for bad in ["", "test", "-1:0", "1:33", "32", "1:", ":1", "1:2:3", "a:b", "1 : x"] {
            assert!(
                matches!(BitRange::parse(bad, 32), Err(RegisterError::InvalidRange { .. })),
                "expected invalid range for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_last_bit_is_valid() {
        assert!(BitRange::parse("31", 32).is_ok());
        assert!(BitRange::parse("0:31", 32).is_ok());
        assert!(BitRange::parse("7", 8).is_ok());
        assert!(BitRange::parse("8", 8).is_err());
    }

    #[test]
    fn test_masks() {
        let range = BitRange::new(4, 7, 32).unwrap();
        assert_eq!(range.max_value(), 0xf);
        assert_eq!(range.mask(), 0xf0);
        assert!(range.contains(4) && range.contains(7));
        assert!(!range.contains(3) && !range.contains(8));

        let full = BitRange::full(64).unwrap();
        assert_eq!(full.mask(), u64::MAX);
    }

    #[test]
    fn test_string_span() {
        let range = BitRange::new(1, 3, 8).unwrap();
        assert_eq!(range.string_span(8), 4..=6);
        let range = BitRange::new(3, 5, 8).unwrap();
        assert_eq!(range.string_span(8), 2..=4);
    }

    #[test]
    #[should_panic]
    fn test_string_span_past_width_panics() {
        let _ = BitRange::new(2, 8, 16).unwrap().string_span(8);
    }

    #[test]
    fn test_deserialize_normalizes_bounds() {
        let range: BitRange = serde_json::from_str(r#"{"start":5,"end":2}"#).unwrap();
        assert_eq!((range.start(), range.end()), (2, 5));
        assert_eq!(range.len(), 4);

        assert!(serde_json::from_str::<BitRange>(r#"{"start":0,"end":64}"#).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(BitRange::new(5, 2, 8).unwrap().to_string(), "[2:5]");
        assert_eq!(BitRange::bit(0, 8).unwrap().to_string(), "[0]");
    }
}
