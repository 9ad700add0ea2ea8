use alloy_primitives::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const BPS_SCALE: u16 = 10_000;

/// Slippage tolerance in basis points (1 bps = 0.01%).
///
/// Values above 100% are clamped at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlippageTolerance(u16);

impl SlippageTolerance {
    /// 0.5%, the policy default.
    pub const DEFAULT: Self = Self(50);

    #[must_use]
    pub fn from_bps(bps: u16) -> Self {
        Self(bps.min(BPS_SCALE))
    }

    #[must_use]
    pub fn bps(&self) -> u16 {
        self.0
    }

    #[must_use]
    pub fn as_percent(&self) -> Decimal {
        Decimal::from(self.0) / Decimal::from(100)
    }

    /// Applies the tolerance to a raw minimum output.
    ///
    /// `raw * (10_000 - bps) / 10_000` in integer arithmetic, truncating
    /// toward zero so the result is never stricter than the tolerance asks.
    #[must_use]
    pub fn apply_floor(&self, raw: U256) -> U256 {
        let keep = U256::from(BPS_SCALE - self.0);
        let scale = U256::from(BPS_SCALE);
        match raw.checked_mul(keep) {
            Some(scaled) => scaled / scale,
            // Out of U256 range: divide first, losing at most one scale unit.
            None => raw / scale * keep,
        }
    }
}

impl Default for SlippageTolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_truncates() {
        // 1000 raw units at 0.5% -> floor(1000 * 99.5 / 100) = 995, never 996
        let tolerance = SlippageTolerance::from_bps(50);
        assert_eq!(tolerance.apply_floor(U256::from(1000u64)), U256::from(995u64));

        // 999 * 9950 / 10000 = 994.005 -> 994
        assert_eq!(tolerance.apply_floor(U256::from(999u64)), U256::from(994u64));
    }

    #[test]
    fn test_zero_tolerance_is_identity() {
        let tolerance = SlippageTolerance::from_bps(0);
        assert_eq!(tolerance.apply_floor(U256::from(12345u64)), U256::from(12345u64));
    }

    #[test]
    fn test_full_tolerance_floors_to_zero() {
        let tolerance = SlippageTolerance::from_bps(10_000);
        assert_eq!(tolerance.apply_floor(U256::from(12345u64)), U256::ZERO);
        // and clamping above 100%
        assert_eq!(SlippageTolerance::from_bps(u16::MAX).bps(), 10_000);
    }

    #[test]
    fn test_as_percent() {
        assert_eq!(SlippageTolerance::DEFAULT.as_percent(), Decimal::new(5, 1));
    }
}
