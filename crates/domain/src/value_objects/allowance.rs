use super::Amount;
use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// Snapshot of an ERC20 allowance against a required spend.
///
/// Refreshed after any approval or trade confirmation; callers must treat a
/// missing snapshot as insufficient (fail closed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceState {
    /// Allowance granted by the owner to the spender, raw units.
    pub allowance: U256,
    /// Raw amount the pending trade needs to spend.
    pub required: U256,
}

impl AllowanceState {
    #[must_use]
    pub fn new(allowance: U256, required: U256) -> Self {
        Self {
            allowance,
            required,
        }
    }

    /// A state that always passes, for spends that need no allowance
    /// (native asset).
    #[must_use]
    pub fn unlimited(required: U256) -> Self {
        Self {
            allowance: U256::MAX,
            required,
        }
    }

    #[must_use]
    pub fn is_sufficient(&self) -> bool {
        self.allowance >= self.required
    }

    /// Raw shortfall; zero when sufficient.
    #[must_use]
    pub fn missing(&self) -> U256 {
        self.required.saturating_sub(self.allowance)
    }

    /// The shortfall as an amount at the spent token's decimals.
    #[must_use]
    pub fn missing_amount(&self, decimals: u8) -> Amount {
        Amount::new(self.missing(), decimals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sufficiency_boundary() {
        let exact = AllowanceState::new(U256::from(100u64), U256::from(100u64));
        assert!(exact.is_sufficient());
        assert_eq!(exact.missing(), U256::ZERO);

        let short = AllowanceState::new(U256::from(99u64), U256::from(100u64));
        assert!(!short.is_sufficient());
        assert_eq!(short.missing(), U256::from(1u64));
    }

    #[test]
    fn test_missing_plus_allowance_equals_required() {
        let state = AllowanceState::new(U256::from(40u64), U256::from(100u64));
        assert_eq!(state.allowance + state.missing(), state.required);
    }

    #[test]
    fn test_monotonic_in_required() {
        // sufficient for X implies sufficient for anything <= X
        let allowance = U256::from(100u64);
        assert!(AllowanceState::new(allowance, U256::from(100u64)).is_sufficient());
        assert!(AllowanceState::new(allowance, U256::from(50u64)).is_sufficient());
        assert!(!AllowanceState::new(allowance, U256::from(101u64)).is_sufficient());
    }

    #[test]
    fn test_unlimited_always_passes() {
        assert!(AllowanceState::unlimited(U256::MAX).is_sufficient());
    }
}
