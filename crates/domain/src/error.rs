//! Error taxonomy for trade orchestration.
//!
//! Every failure surfaced by the engine is classified into one of these
//! variants so callers can present it and decide whether a retry makes
//! sense. None of them should tear down the orchestrator state machine.

use alloy_primitives::{Address, U256};
use thiserror::Error;

/// Failures that can occur while quoting, approving or trading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TradeError {
    /// The wallet signer declined the transaction.
    #[error("transaction rejected by the wallet")]
    UserRejected,

    /// Insufficient token or gas balance.
    #[error("insufficient funds: {0}")]
    InsufficientFunds(String),

    /// The spend request exceeds the granted allowance. Normally handled as
    /// a state, not an error; surfaced when a trade is attempted anyway.
    #[error("allowance {allowance} is below the required {required}")]
    InsufficientAllowance { allowance: U256, required: U256 },

    /// On-chain execution reverted (slippage exceeded, deadline expired,
    /// pool invariant violated, ...).
    #[error("contract reverted: {0}")]
    ContractReverted(String),

    /// RPC or connectivity failure.
    #[error("network error: {0}")]
    Network(String),

    /// No configured pool serves the selected token pair.
    #[error("no pool is configured for the selected token pair")]
    NoPoolAvailable,

    /// The quote view call failed or returned nothing usable.
    #[error("quote unavailable: {0}")]
    QuoteUnavailable(String),

    /// The amount string could not be parsed at the token's decimals.
    #[error("invalid amount '{0}'")]
    InvalidAmount(String),

    /// An operation was requested in a phase that does not allow it.
    #[error("operation not available: {0}")]
    NotReady(&'static str),
}

impl TradeError {
    /// Whether the user can re-attempt after this failure without changing
    /// the selected token pair.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::NoPoolAvailable)
    }

    /// Classifies a raw provider/wallet error message.
    ///
    /// Wallet connectors and RPC nodes report failures as free-form text;
    /// the recognizable shapes are folded into the taxonomy and everything
    /// else is treated as a network failure.
    #[must_use]
    pub fn classify_provider_message(message: &str) -> Self {
        let lower = message.to_ascii_lowercase();
        if lower.contains("user rejected") || lower.contains("user denied") {
            Self::UserRejected
        } else if lower.contains("insufficient funds") || lower.contains("insufficient balance") {
            Self::InsufficientFunds(message.to_string())
        } else if lower.contains("revert") || lower.contains("execution reverted") {
            Self::ContractReverted(message.to_string())
        } else {
            Self::Network(message.to_string())
        }
    }
}

/// Invalid static configuration, rejected at registry construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A pool was configured with the same token on both sides.
    #[error("pool {pool} has identical collateral and synthetic tokens")]
    PoolTokensEqual { pool: Address },

    /// Two pools were configured for the same unordered token pair.
    #[error("pools {first} and {second} serve the same token pair")]
    DuplicatePoolPair { first: Address, second: Address },
}
