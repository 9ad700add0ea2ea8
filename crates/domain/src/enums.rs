use serde::{Deserialize, Serialize};

/// Direction of a trade against a pool.
///
/// Derived from the (from, to) pair of a resolved pool, never stored:
/// `Mint` spends collateral for synthetic tokens, `Redeem` spends synthetic
/// tokens for collateral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeDirection {
    Mint,
    Redeem,
}

impl std::fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mint => write!(f, "mint"),
            Self::Redeem => write!(f, "redeem"),
        }
    }
}
