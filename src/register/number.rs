//! Integer literal parsing.
//!
//! Accepted forms, with an optional leading `+` or `-`:
//! - `42` decimal
//! - `0x2a` hexadecimal
//! - `0o52` or `052` octal
//! - `0b101010` binary
//!
//! Underscores may be used as digit separators (`0xdead_beef`).

use super::RegisterError;

/// Parse a signed integer literal.
pub fn parse_int(input: &str) -> Result<i128, RegisterError> {
    let text = input.trim();
    if text.is_empty() {
        return Err(RegisterError::parse(input, "empty input"));
    }

    let (negative, unsigned) = match text.as_bytes()[0] {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };

    let (radix, digits) = split_radix(unsigned);
    let digits: String = digits.chars().filter(|&c| c != '_').collect();

    if digits.is_empty() {
        return Err(RegisterError::parse(input, "missing digits"));
    }
    // from_str_radix tolerates a leading sign, which would allow "--1"
    if !digits.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(RegisterError::parse(input, "unexpected character"));
    }

    let magnitude = u128::from_str_radix(&digits, radix).map_err(|e| {
        RegisterError::parse(input, format!("not a base-{} number ({})", radix, e))
    })?;
    let magnitude = i128::try_from(magnitude)
        .map_err(|_| RegisterError::parse(input, "number too large"))?;

    Ok(if negative { -magnitude } else { magnitude })
}

/// Parse a non-negative integer literal.
pub fn parse_unsigned(input: &str) -> Result<u128, RegisterError> {
    let value = parse_int(input)?;
    u128::try_from(value).map_err(|_| RegisterError::parse(input, "negative values are not supported"))
}

/// Split a literal into its radix and digit part.
fn split_radix(text: &str) -> (u32, &str) {
    let lower = text.get(..2).map(|p| p.to_ascii_lowercase());
    match lower.as_deref() {
        Some("0x") => (16, &text[2..]),
        Some("0o") => (8, &text[2..]),
        Some("0b") => (2, &text[2..]),
        _ if text.len() > 1 && text.starts_with('0') => (8, &text[1..]),
        _ => (10, text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal() {
        assert_eq!(parse_int("0").unwrap(), 0);
        assert_eq!(parse_int("42").unwrap(), 42);
        assert_eq!(parse_int("  17 ").unwrap(), 17);
        assert_eq!(parse_int("-5").unwrap(), -5);
        assert_eq!(parse_int("+5").unwrap(), 5);
    }

    #[test]
    fn test_prefixed_radixes() {
        assert_eq!(parse_int("0x2a").unwrap(), 42);
        assert_eq!(parse_int("0X2A").unwrap(), 42);
        assert_eq!(parse_int("0o52").unwrap(), 42);
        assert_eq!(parse_int("052").unwrap(), 42);
        assert_eq!(parse_int("0b101010").unwrap(), 42);
        assert_eq!(parse_int("-0x10").unwrap(), -16);
    }

    #[test]
    fn test_separators() {
        assert_eq!(parse_int("0xdead_beef").unwrap(), 0xdead_beef);
        assert_eq!(parse_int("1_000").unwrap(), 1000);
    }

    #[test]
    fn test_full_64_bit_range() {
        assert_eq!(parse_int("0xffffffffffffffff").unwrap(), u64::MAX as i128);
    }

    #[test]
    fn test_rejects_malformed() {
        for bad in ["", "  ", "-", "0x", "test", "12a", "08", "0b2", "--1", "+-1", "0x-1", "1.5"] {
            assert!(
                matches!(parse_int(bad), Err(RegisterError::Parse { .. })),
                "expected parse error for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_unsigned_rejects_negative() {
        assert_eq!(parse_unsigned("0x10").unwrap(), 16);
        assert!(matches!(parse_unsigned("-1"), Err(RegisterError::Parse { .. })));
        assert_eq!(parse_unsigned("-0").unwrap(), 0);
    }
}
