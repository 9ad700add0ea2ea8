use crate::error::ConfigError;
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// One deployed synthetic-asset liquidity pool.
///
/// A pool trades between exactly two tokens: its collateral asset and the
/// synthetic token it mints against that collateral. Pools are loaded once
/// from static configuration and never mutated; they are compared by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    /// On-chain contract address.
    pub address: Address,
    /// Collateral-side token address.
    pub collateral_token: Address,
    /// Synthetic-side token address.
    pub synthetic_token: Address,
    /// Display name.
    pub name: String,
    /// Synthetic token symbol.
    pub symbol: String,
    /// Collateral token symbol.
    pub collateral_symbol: String,
}

impl Pool {
    /// Builds a pool, rejecting a configuration where both sides are the
    /// same token.
    pub fn new(
        address: Address,
        collateral_token: Address,
        synthetic_token: Address,
        name: impl Into<String>,
        symbol: impl Into<String>,
        collateral_symbol: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        if collateral_token == synthetic_token {
            return Err(ConfigError::PoolTokensEqual { pool: address });
        }
        Ok(Self {
            address,
            collateral_token,
            synthetic_token,
            name: name.into(),
            symbol: symbol.into(),
            collateral_symbol: collateral_symbol.into(),
        })
    }

    /// Whether this pool serves the given token pair, in either order.
    #[must_use]
    pub fn trades_pair(&self, a: Address, b: Address) -> bool {
        (self.collateral_token == a && self.synthetic_token == b)
            || (self.collateral_token == b && self.synthetic_token == a)
    }
}
