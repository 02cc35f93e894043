//! Zatoshi conversion.
//!
//! One shared implementation of the human-scale ZEC → zatoshi conversion,
//! in pure integer arithmetic: `floor(amount * 10^8)`. Every component that
//! must agree on the integer amount (the intake boundary, amount polling,
//! witness assembly callers) goes through this function; a floating-point
//! reimplementation on either side diverges on amounts a binary double
//! cannot represent and silently breaks exact-amount matching.

use thiserror::Error;

/// 1 ZEC = 10^8 zatoshis
pub const ZATOSHIS_PER_ZEC: u64 = 100_000_000;

const ZATOSHI_DECIMALS: usize = 8;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountParseError {
    #[error("invalid ZEC amount {0:?}")]
    Invalid(String),

    #[error("ZEC amount {0:?} overflows the zatoshi range")]
    Overflow(String),
}

/// Convert a decimal ZEC quantity (e.g. `"1.25"`) to zatoshis.
///
/// Digits beyond the eighth fractional place are truncated (floor). Negative
/// and non-decimal inputs are rejected.
pub fn zec_to_zatoshis(amount: &str) -> Result<u64, AmountParseError> {
    let trimmed = amount.trim();
    let (int_part, frac_part) = match trimmed.split_once('.') {
        Some((i, f)) => (i, f),
        None => (trimmed, ""),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(AmountParseError::Invalid(amount.to_string()));
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(AmountParseError::Invalid(amount.to_string()));
    }

    let whole: u64 = if int_part.is_empty() {
        0
    } else {
        int_part
            .parse()
            .map_err(|_| AmountParseError::Overflow(amount.to_string()))?
    };

    let frac_digits = &frac_part[..frac_part.len().min(ZATOSHI_DECIMALS)];
    let mut frac: u64 = if frac_digits.is_empty() {
        0
    } else {
        // At most 8 digits, always fits
        frac_digits
            .parse()
            .map_err(|_| AmountParseError::Invalid(amount.to_string()))?
    };
    frac *= 10u64.pow((ZATOSHI_DECIMALS - frac_digits.len()) as u32);

    whole
        .checked_mul(ZATOSHIS_PER_ZEC)
        .and_then(|w| w.checked_add(frac))
        .ok_or_else(|| AmountParseError::Overflow(amount.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_amounts() {
        assert_eq!(zec_to_zatoshis("1").unwrap(), 100_000_000);
        assert_eq!(zec_to_zatoshis("0").unwrap(), 0);
        assert_eq!(zec_to_zatoshis("21000000").unwrap(), 2_100_000_000_000_000);
    }

    #[test]
    fn test_fractional_amounts() {
        assert_eq!(zec_to_zatoshis("0.1").unwrap(), 10_000_000);
        assert_eq!(zec_to_zatoshis("0.00000001").unwrap(), 1);
        assert_eq!(zec_to_zatoshis("1.25").unwrap(), 125_000_000);
        assert_eq!(zec_to_zatoshis(".5").unwrap(), 50_000_000);
        assert_eq!(zec_to_zatoshis("3.").unwrap(), 300_000_000);
    }

    #[test]
    fn test_floor_beyond_eight_digits() {
        assert_eq!(zec_to_zatoshis("1.999999999").unwrap(), 199_999_999);
        assert_eq!(zec_to_zatoshis("0.000000019").unwrap(), 1);
        assert_eq!(zec_to_zatoshis("0.000000001").unwrap(), 0);
    }

    #[test]
    fn test_float_hostile_amounts() {
        // 0.29 is not representable as a binary double; integer parsing must
        // still land exactly.
        assert_eq!(zec_to_zatoshis("0.29").unwrap(), 29_000_000);
        assert_eq!(zec_to_zatoshis("0.07").unwrap(), 7_000_000);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(zec_to_zatoshis("").is_err());
        assert!(zec_to_zatoshis(".").is_err());
        assert!(zec_to_zatoshis("-1").is_err());
        assert!(zec_to_zatoshis("1.2.3").is_err());
        assert!(zec_to_zatoshis("abc").is_err());
        assert!(zec_to_zatoshis("1e8").is_err());
    }

    #[test]
    fn test_overflow() {
        assert!(matches!(
            zec_to_zatoshis("999999999999999999999"),
            Err(AmountParseError::Overflow(_))
        ));
        assert!(matches!(
            zec_to_zatoshis("184467440738"),
            Err(AmountParseError::Overflow(_))
        ));
    }
}
