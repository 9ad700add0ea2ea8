use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// An ERC20-like asset, or the chain's native asset when the address is the
/// all-zero sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub address: Address,
    pub name: String,
    pub symbol: String,
    /// Fixed-point scale for all amounts of this token.
    pub decimals: u8,
}

impl Token {
    pub fn new(
        address: Address,
        name: impl Into<String>,
        symbol: impl Into<String>,
        decimals: u8,
    ) -> Self {
        Self {
            address,
            name: name.into(),
            symbol: symbol.into(),
            decimals,
        }
    }

    /// Whether this is the chain's native asset (all-zero address).
    /// The native asset never requires an ERC20 allowance.
    #[must_use]
    pub fn is_native(&self) -> bool {
        self.address == Address::ZERO
    }
}
