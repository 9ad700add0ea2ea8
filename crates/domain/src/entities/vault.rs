use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// One deployed LP vault.
///
/// A vault takes collateral deposits, provides leveraged liquidity to a
/// single pool, and issues its own LP token against the deposits. Like
/// pools, vaults are loaded once from static configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vault {
    /// On-chain vault contract address; also the LP token address.
    pub address: Address,
    /// Pool this vault provides liquidity to.
    pub pool: Address,
    /// Token accepted for deposits.
    pub collateral_token: Address,
    /// Display name.
    pub name: String,
    /// Leverage multiplier (1, 5, 20).
    pub leverage: u8,
}

impl Vault {
    pub fn new(
        address: Address,
        pool: Address,
        collateral_token: Address,
        name: impl Into<String>,
        leverage: u8,
    ) -> Self {
        Self {
            address,
            pool,
            collateral_token,
            name: name.into(),
            leverage,
        }
    }
}
