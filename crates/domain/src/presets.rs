//! Built-in token catalog and pool configuration for the target chain.
//!
//! Mirrors the deployed configuration: a handful of well-known BSC tokens,
//! the native asset, and the synthetic-asset pools. Embedders can ignore
//! these and build a [`PoolRegistry`] from their own configuration.

use crate::entities::{Pool, Token, Vault};
use crate::registry::PoolRegistry;
use alloy_primitives::{Address, address};

/// Rate-limited faucet dispensing the test collateral.
pub const FAUCET_LIMITER: Address = address!("3f8a6b21e95c04d7b1a2c83fe09d4ab5c7e612f0");

/// Lookup table over the known tokens of the configured chain.
#[derive(Debug, Clone)]
pub struct TokenCatalog {
    tokens: Vec<Token>,
}

impl TokenCatalog {
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    #[must_use]
    pub fn by_address(&self, address: Address) -> Option<&Token> {
        self.tokens.iter().find(|t| t.address == address)
    }

    #[must_use]
    pub fn by_symbol(&self, symbol: &str) -> Option<&Token> {
        self.tokens.iter().find(|t| t.symbol.eq_ignore_ascii_case(symbol))
    }

    /// Decimals for an address, defaulting to 18 for unknown tokens (every
    /// asset on the target chain uses 18).
    #[must_use]
    pub fn decimals_of(&self, address: Address) -> u8 {
        self.by_address(address).map_or(18, |t| t.decimals)
    }

    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

/// The default token catalog: native BNB plus the common BSC tokens and the
/// pool assets.
#[must_use]
pub fn default_tokens() -> TokenCatalog {
    TokenCatalog::new(vec![
        Token::new(Address::ZERO, "Binance Coin", "BNB", 18),
        Token::new(
            address!("55d398326f99059ff775485246999027b3197955"),
            "Tether USD",
            "USDT",
            18,
        ),
        Token::new(
            address!("8ac76a51cc950d9822d68b83fe1ad97b32cd580d"),
            "USD Coin",
            "USDC",
            18,
        ),
        Token::new(
            address!("1af3f329e8be154074d8769d1ffa4ee058b1dbc3"),
            "Dai Stablecoin",
            "DAI",
            18,
        ),
        Token::new(
            address!("0e09fabb73bd3ade0a17ecc321fd13a19e81ce82"),
            "PancakeSwap Token",
            "CAKE",
            18,
        ),
        Token::new(
            address!("2170ed0880ac9a755fd29b2688956bd959f933f8"),
            "Ethereum Token",
            "ETH",
            18,
        ),
        Token::new(
            address!("7130d2a12b9bcbfae4f2634d864a1ee1ce3ead9c"),
            "Bitcoin Token",
            "BTCB",
            18,
        ),
        Token::new(
            address!("c5f0f7b66764f6ec8c8dff7ba683102295e16409"),
            "First Digital USD",
            "FDUSD",
            18,
        ),
        Token::new(
            address!("0b5e46027b856e6109e9817c37ddab1796331e56"),
            "Synth EUR",
            "sEUR",
            18,
        ),
        Token::new(
            address!("6d1f24428ab105c47db9da27b5bfa2ff2e6e7a73"),
            "Synth USD",
            "sUSD",
            18,
        ),
        Token::new(
            address!("9e4b370956eb3a16bd134a8c3fc1d4e97c8a3b10"),
            "Synth Gold",
            "sGOLD",
            18,
        ),
    ])
}

/// The default pool registry for the deployed pools.
pub fn default_registry() -> PoolRegistry {
    let pools = vec![
        Pool::new(
            address!("41d5256987a1e565739b7192afb8db15e9e976e4"),
            address!("c5f0f7b66764f6ec8c8dff7ba683102295e16409"),
            address!("0b5e46027b856e6109e9817c37ddab1796331e56"),
            "Synth EUR Pool",
            "sEUR",
            "FDUSD",
        )
        .expect("static pool config"),
        Pool::new(
            address!("7d3b4f8a21c6de95b04a7c1f08d2aa613c9eab52"),
            address!("8ac76a51cc950d9822d68b83fe1ad97b32cd580d"),
            address!("6d1f24428ab105c47db9da27b5bfa2ff2e6e7a73"),
            "Synth USD Pool",
            "sUSD",
            "USDC",
        )
        .expect("static pool config"),
    ];
    PoolRegistry::new(pools).expect("static pool config")
}

/// The deployed LP vaults, one per leverage tier, all feeding the EUR pool
/// with FDUSD collateral.
#[must_use]
pub fn default_vaults() -> Vec<Vault> {
    let pool = address!("41d5256987a1e565739b7192afb8db15e9e976e4");
    let fdusd = address!("c5f0f7b66764f6ec8c8dff7ba683102295e16409");
    vec![
        Vault::new(
            address!("cf27439fa231af9931ee40c4f27bb77b83826f3c"),
            pool,
            fdusd,
            "Conservative Vault",
            1,
        ),
        Vault::new(
            address!("a84f1c09d2e67b35c8be40721fd9aa3185c7de42"),
            pool,
            fdusd,
            "Balanced Vault",
            5,
        ),
        Vault::new(
            address!("5b9d02e8c1a74f6391de85b20cfa6ee4073c9a18"),
            pool,
            fdusd,
            "Aggressive Vault",
            20,
        ),
    ]
}
