use rust_decimal::prelude::*;

use crate::{MerkleError, MerkleResult};

/// Largest mint precision representable with u64 smallest-unit amounts.
///
/// u64::MAX is about 1.84 × 10^19, so 18 decimals still leaves room for
/// roughly 18 whole tokens per recipient.
pub const MAX_SUPPORTED_DECIMALS: u8 = 18;

/// Convert a human amount (e.g. `250.5`) into smallest units for a mint with
/// `decimals` places.
///
/// Unlike budget splitting, allocations are never rounded: an amount with
/// more precision than the mint can hold is rejected.
pub fn scale_amount(human_amount: Decimal, decimals: u8) -> MerkleResult<u64> {
    if decimals > MAX_SUPPORTED_DECIMALS {
        return Err(MerkleError::UnsupportedDecimals(decimals));
    }
    if human_amount.is_sign_negative() && !human_amount.is_zero() {
        return Err(MerkleError::NegativeAmount(human_amount.to_string()));
    }

    // 10^18 fits in i64
    let scale_factor = Decimal::new(10_i64.pow(decimals as u32), 0);

    let token_amount = human_amount
        .checked_mul(scale_factor)
        .ok_or_else(|| MerkleError::AmountOverflow(human_amount.to_string()))?;

    if !token_amount.fract().is_zero() {
        return Err(MerkleError::FractionalSmallestUnit {
            amount: human_amount.to_string(),
            decimals,
        });
    }

    token_amount
        .to_u64()
        .ok_or_else(|| MerkleError::AmountOverflow(human_amount.to_string()))
}

/// Parse a textual amount and scale it. Accepts `"1"`, `"0.25"`, `"1000000"`.
pub fn parse_amount(raw: &str, decimals: u8) -> MerkleResult<u64> {
    let human_amount = Decimal::from_str_exact(raw.trim())
        .map_err(|_| MerkleError::InvalidAmount(raw.to_string()))?;
    scale_amount(human_amount, decimals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    #[test]
    fn test_scale_whole_and_fractional_amounts() {
        assert_eq!(scale_amount(dec!(100), 9).unwrap(), 100_000_000_000);
        assert_eq!(scale_amount(dec!(250.5), 9).unwrap(), 250_500_000_000);
        assert_eq!(scale_amount(dec!(1.5), 6).unwrap(), 1_500_000);
        assert_eq!(scale_amount(dec!(42), 0).unwrap(), 42);
        assert_eq!(scale_amount(dec!(0), 9).unwrap(), 0);
    }

    #[test]
    fn test_scale_rejects_sub_unit_precision() {
        let result = scale_amount(dec!(0.0000001), 6);
        assert!(matches!(
            result,
            Err(MerkleError::FractionalSmallestUnit { decimals: 6, .. })
        ));
    }

    #[test]
    fn test_scale_rejects_negative() {
        assert!(matches!(
            scale_amount(dec!(-1), 9),
            Err(MerkleError::NegativeAmount(_))
        ));
    }

    #[test]
    fn test_scale_rejects_overflow() {
        // 18.45 tokens at 18 decimals exceeds u64::MAX
        assert!(matches!(
            scale_amount(dec!(18.45), 18),
            Err(MerkleError::AmountOverflow(_))
        ));
        assert!(scale_amount(dec!(18), 18).is_ok());
    }

    #[test]
    fn test_scale_rejects_excessive_decimals() {
        assert_eq!(
            scale_amount(dec!(1), 19),
            Err(MerkleError::UnsupportedDecimals(19))
        );
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1000", 9).unwrap(), 1_000_000_000_000);
        assert_eq!(parse_amount(" 0.25 ", 2).unwrap(), 25);
        assert_eq!(
            parse_amount("abc", 9),
            Err(MerkleError::InvalidAmount("abc".to_string()))
        );
        assert!(parse_amount("1.001", 2).is_err());
    }
}
