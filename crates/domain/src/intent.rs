//! Trade intents: the immutable input to a single mint/redeem submission.

use crate::entities::Pool;
use crate::enums::TradeDirection;
use crate::value_objects::{Amount, SlippageTolerance};
use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// Everything a single trade submission needs.
///
/// Constructed once per user-initiated action, consumed by one contract
/// call, never reused. The minimum output carries the live quote; slippage
/// adjustment happens at submission via [`TradeIntent::adjusted_min_output`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeIntent {
    pub pool: Pool,
    pub direction: TradeDirection,
    /// Amount being spent, at the input token's decimals.
    pub input: Amount,
    /// Quoted output before slippage adjustment, at the output token's decimals.
    pub min_output: Amount,
    pub slippage: SlippageTolerance,
    /// On-chain deadline; the contract rejects execution after this time.
    pub expiration_unix: u64,
    /// Recipient of the minted/redeemed tokens.
    pub recipient: Address,
}

impl TradeIntent {
    /// The slippage-floored minimum output in raw units, as passed to the
    /// contract. Truncates toward zero, never rounds up.
    #[must_use]
    pub fn adjusted_min_output(&self) -> U256 {
        self.slippage.apply_floor(self.min_output.raw)
    }
}
