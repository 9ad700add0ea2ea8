//! Engine policy configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use synthswap_domain::prelude::SlippageTolerance;

/// Tunable policy for the trade engine.
///
/// The defaults reproduce the deployed front-end's behavior; none of the
/// invariants depend on the specific values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Slippage tolerance in basis points (50 = 0.5%).
    pub slippage_bps: u16,
    /// Validity window stamped onto each trade as the on-chain deadline.
    pub deadline_secs: u64,
    /// Delay before re-reading balances/allowance after a confirmed
    /// transaction, to absorb indexing lag.
    pub refresh_delay_secs: u64,
    /// How far back the activity scan looks, in blocks.
    pub history_lookback_blocks: u64,
    /// Maximum entries returned by the activity scan.
    pub history_limit: usize,
}

impl EngineConfig {
    #[must_use]
    pub fn slippage(&self) -> SlippageTolerance {
        SlippageTolerance::from_bps(self.slippage_bps)
    }

    #[must_use]
    pub fn refresh_delay(&self) -> Duration {
        Duration::from_secs(self.refresh_delay_secs)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            slippage_bps: 50,          // 0.5%
            deadline_secs: 1200,       // 20 minutes
            refresh_delay_secs: 2,
            history_lookback_blocks: 10_000,
            history_limit: 10,
        }
    }
}
