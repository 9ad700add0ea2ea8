//! Static pool registry: pair resolution and trade classification.
//!
//! Pure functions over configuration loaded once at process start. No two
//! configured pools may serve the same unordered token pair, so resolution
//! is never ambiguous.

use crate::entities::Pool;
use crate::enums::TradeDirection;
use crate::error::ConfigError;
use alloy_primitives::Address;

/// The set of tradable pools.
#[derive(Debug, Clone)]
pub struct PoolRegistry {
    pools: Vec<Pool>,
}

impl PoolRegistry {
    /// Builds a registry, rejecting duplicate token pairs.
    pub fn new(pools: Vec<Pool>) -> Result<Self, ConfigError> {
        for (i, pool) in pools.iter().enumerate() {
            if let Some(other) = pools[i + 1..]
                .iter()
                .find(|p| pool.trades_pair(p.collateral_token, p.synthetic_token))
            {
                return Err(ConfigError::DuplicatePoolPair {
                    first: pool.address,
                    second: other.address,
                });
            }
        }
        Ok(Self { pools })
    }

    /// Resolves the pool whose token pair equals `{a, b}`, order-independent.
    ///
    /// `None` means no configured pool serves the pair; callers degrade to a
    /// "no pool available" state rather than fail.
    #[must_use]
    pub fn resolve(&self, a: Address, b: Address) -> Option<&Pool> {
        self.pools.iter().find(|pool| pool.trades_pair(a, b))
    }

    /// Classifies a trade on a resolved pool.
    ///
    /// `Mint` iff spending the pool's collateral for its synthetic token,
    /// `Redeem` for the reverse. `None` marks a pair that does not belong to
    /// the pool; callers must only classify after a successful resolve.
    #[must_use]
    pub fn classify(from: Address, to: Address, pool: &Pool) -> Option<TradeDirection> {
        if from == pool.collateral_token && to == pool.synthetic_token {
            Some(TradeDirection::Mint)
        } else if from == pool.synthetic_token && to == pool.collateral_token {
            Some(TradeDirection::Redeem)
        } else {
            None
        }
    }

    /// All configured pools.
    #[must_use]
    pub fn pools(&self) -> &[Pool] {
        &self.pools
    }
}
