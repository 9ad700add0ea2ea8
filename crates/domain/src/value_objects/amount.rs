use crate::error::TradeError;
use alloy_primitives::U256;
use alloy_primitives::utils::{ParseUnits, format_units, parse_units};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A token amount in raw smallest-unit representation.
///
/// All arithmetic happens on `raw`; human decimal strings exist only at the
/// boundary and are converted through the token's `decimals`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Amount {
    pub raw: U256,
    pub decimals: u8,
}

impl Amount {
    #[must_use]
    pub fn new(raw: U256, decimals: u8) -> Self {
        Self { raw, decimals }
    }

    #[must_use]
    pub fn zero(decimals: u8) -> Self {
        Self {
            raw: U256::ZERO,
            decimals,
        }
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }

    /// Parses a human decimal string ("1.5") into raw units at `decimals`.
    ///
    /// Negative values and fractional parts finer than `decimals` are
    /// rejected.
    pub fn parse(text: &str, decimals: u8) -> Result<Self, TradeError> {
        let trimmed = text.trim();
        match parse_units(trimmed, decimals) {
            Ok(ParseUnits::U256(raw)) => Ok(Self { raw, decimals }),
            _ => Err(TradeError::InvalidAmount(text.to_string())),
        }
    }

    /// Formats the raw value back into a human decimal string.
    #[must_use]
    pub fn format(&self) -> String {
        format_units(self.raw, self.decimals).unwrap_or_else(|_| self.raw.to_string())
    }

    /// Display-side decimal view, for ratio math at the UI boundary only.
    #[must_use]
    pub fn to_decimal(&self) -> Option<Decimal> {
        Decimal::from_str(&self.format()).ok()
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scales_by_decimals() {
        let amount = Amount::parse("1.5", 18).unwrap();
        assert_eq!(amount.raw, U256::from(1_500_000_000_000_000_000u128));

        let amount = Amount::parse("100", 6).unwrap();
        assert_eq!(amount.raw, U256::from(100_000_000u64));
    }

    #[test]
    fn test_round_trip_within_precision() {
        for (text, decimals) in [("1.5", 18u8), ("100", 6), ("0.000001", 6), ("42.125", 8)] {
            let amount = Amount::parse(text, decimals).unwrap();
            let reparsed = Amount::parse(&amount.format(), decimals).unwrap();
            assert_eq!(amount.raw, reparsed.raw, "drift for {text}");
        }
    }

    #[test]
    fn test_rejects_garbage_and_negative() {
        assert!(Amount::parse("abc", 18).is_err());
        assert!(Amount::parse("-1", 18).is_err());
        assert!(Amount::parse("", 18).is_err());
    }

    #[test]
    fn test_zero() {
        let zero = Amount::zero(18);
        assert!(zero.is_zero());
        assert_eq!(Amount::parse("0", 18).unwrap(), zero);
    }
}
