//! Trait seams between the engine and the chain.
//!
//! The engine never talks to a transport directly; it consumes these traits
//! so tests can substitute in-memory doubles and embedders can plug in
//! their own wallet.

use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use synthswap_domain::prelude::TradeError;

/// Transaction hash returned by the wallet on broadcast.
pub type TxHash = B256;

/// Outcome of a mined transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxReceipt {
    pub tx_hash: TxHash,
    pub block_number: u64,
    /// False when execution reverted.
    pub success: bool,
}

/// Split of a pool's collateral holdings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollateralBreakdown {
    pub users_collateral: U256,
    pub lps_collateral: U256,
    pub total_collateral: U256,
}

/// A liquidity provider's position in a pool, decoded from
/// `positionLPInfo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LpPosition {
    pub actual_collateral: U256,
    pub tokens_collateralized: U256,
    pub overcollateralization: U256,
    pub capacity: U256,
    pub utilization: U256,
    pub coverage: U256,
    pub mint_shares: U256,
    pub redeem_shares: U256,
    pub interest_shares: U256,
    pub is_overcollateralized: bool,
}

/// Live snapshot of a faucet allotment for one address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaucetAllotment {
    /// Raw amount still claimable today.
    pub remaining: U256,
    /// Seconds until the allotment resets.
    pub seconds_until_reset: u64,
    /// Raw per-address daily cap.
    pub daily_limit: U256,
}

/// Which side of the pool an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolEventKind {
    Minted,
    Redeemed,
}

/// A decoded `Minted`/`Redeemed` log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolEvent {
    pub kind: PoolEventKind,
    pub pool: Address,
    pub user: Address,
    pub tx_hash: TxHash,
    pub block_number: u64,
    /// Collateral side of the trade, raw units.
    pub collateral_raw: U256,
    /// Synthetic side of the trade, raw units.
    pub synthetic_raw: U256,
    /// Fee paid, raw units of the collateral token.
    pub fee_raw: U256,
}

/// View calls against a pool contract.
#[async_trait]
pub trait PoolReads: Send + Sync {
    /// `getMintTradeInfo`: synthetic tokens received and fee for a raw
    /// collateral input.
    async fn mint_quote(&self, pool: Address, collateral_in: U256)
    -> Result<(U256, U256), TradeError>;

    /// `getRedeemTradeInfo`: collateral received and fee for a raw
    /// synthetic input.
    async fn redeem_quote(&self, pool: Address, synthetic_in: U256)
    -> Result<(U256, U256), TradeError>;

    /// Pool fee percentage, raw 18-decimals fixed point.
    async fn fee_percentage(&self, pool: Address) -> Result<U256, TradeError>;

    /// Outstanding synthetic token supply.
    async fn total_synthetic_tokens(&self, pool: Address) -> Result<U256, TradeError>;

    /// Collateral held by the pool, split by owner class.
    async fn total_collateral(&self, pool: Address) -> Result<CollateralBreakdown, TradeError>;
}

/// View calls against a vault contract and its pool-side LP position.
#[async_trait]
pub trait VaultReads: Send + Sync {
    /// `getRate`: LP token rate, raw 18-decimals fixed point.
    async fn vault_rate(&self, vault: Address) -> Result<U256, TradeError>;

    /// Outstanding vault LP token supply.
    async fn vault_total_supply(&self, vault: Address) -> Result<U256, TradeError>;

    /// `positionLPInfo(lp)` on the pool the vault provides liquidity to.
    async fn lp_position(&self, pool: Address, lp: Address) -> Result<LpPosition, TradeError>;
}

/// View calls against the faucet limiter.
#[async_trait]
pub trait FaucetReads: Send + Sync {
    async fn faucet_allotment(
        &self,
        faucet: Address,
        user: Address,
    ) -> Result<FaucetAllotment, TradeError>;
}

/// ERC20 view calls.
#[async_trait]
pub trait Erc20Reads: Send + Sync {
    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256, TradeError>;

    async fn allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, TradeError>;
}

/// Historical event queries over a bounded block range.
#[async_trait]
pub trait EventScan: Send + Sync {
    async fn latest_block(&self) -> Result<u64, TradeError>;

    /// Decoded `Minted`/`Redeemed` events emitted by `pool` for `user`
    /// within `[from_block, to_block]`.
    async fn pool_events(
        &self,
        pool: Address,
        user: Address,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<PoolEvent>, TradeError>;
}

/// The connected wallet: an opaque signing and broadcasting capability.
///
/// Implementations are expected to classify their failures through
/// [`TradeError::classify_provider_message`] so rejections, balance
/// problems and reverts surface with the right variant.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// The connected account.
    fn account(&self) -> Address;

    /// Signs and broadcasts a transaction, returning its hash once the
    /// wallet accepts it.
    async fn send_transaction(&self, to: Address, calldata: Vec<u8>) -> Result<TxHash, TradeError>;

    /// Waits until the transaction is mined and returns its receipt.
    /// Submitted transactions are bounded by the on-chain deadline, not a
    /// client-side timeout.
    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<TxReceipt, TradeError>;
}
