//! Contract reads over the JSON-RPC provider.

use crate::abi::{
    DAILY_LIMITCall, Minted, Redeemed, allowanceCall, balanceOfCall, feePercentageCall,
    getMintTradeInfoCall, getRateCall, getRedeemTradeInfoCall, getRemainingDailyLimitCall,
    getTimeUntilResetCall, positionLPInfoCall, totalCollateralAmountCall,
    totalSupplyCall, totalSyntheticTokensCall,
};
use crate::rpc::RpcProvider;
use crate::traits::{
    CollateralBreakdown, Erc20Reads, EventScan, FaucetAllotment, FaucetReads, LpPosition,
    PoolEvent, PoolEventKind, PoolReads, VaultReads,
};
use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::{SolCall, SolEvent};
use async_trait::async_trait;
use std::sync::Arc;
use synthswap_domain::prelude::TradeError;
use tracing::warn;

/// Read-side adapter implementing the engine's chain traits.
pub struct PoolReader {
    provider: Arc<RpcProvider>,
}

impl PoolReader {
    pub fn new(provider: Arc<RpcProvider>) -> Self {
        Self { provider }
    }

    async fn view<C: SolCall>(&self, to: Address, call: C) -> Result<C::Return, TradeError> {
        let raw = self.provider.call(to, call.abi_encode()).await?;
        C::abi_decode_returns(&raw, true)
            .map_err(|e| TradeError::Network(format!("abi decode: {e}")))
    }
}

#[async_trait]
impl PoolReads for PoolReader {
    async fn mint_quote(
        &self,
        pool: Address,
        collateral_in: U256,
    ) -> Result<(U256, U256), TradeError> {
        let ret = self
            .view(pool, getMintTradeInfoCall { _collateralAmount: collateral_in })
            .await?;
        Ok((ret.synthTokensReceived, ret.feePaid))
    }

    async fn redeem_quote(
        &self,
        pool: Address,
        synthetic_in: U256,
    ) -> Result<(U256, U256), TradeError> {
        let ret = self
            .view(pool, getRedeemTradeInfoCall { _syntTokensAmount: synthetic_in })
            .await?;
        Ok((ret.collateralAmountReceived, ret.feePaid))
    }

    async fn fee_percentage(&self, pool: Address) -> Result<U256, TradeError> {
        Ok(self.view(pool, feePercentageCall {}).await?.fee)
    }

    async fn total_synthetic_tokens(&self, pool: Address) -> Result<U256, TradeError> {
        Ok(self.view(pool, totalSyntheticTokensCall {}).await?.totalTokens)
    }

    async fn total_collateral(&self, pool: Address) -> Result<CollateralBreakdown, TradeError> {
        let ret = self.view(pool, totalCollateralAmountCall {}).await?;
        Ok(CollateralBreakdown {
            users_collateral: ret.usersCollateral,
            lps_collateral: ret.lpsCollateral,
            total_collateral: ret.totalCollateral,
        })
    }
}

#[async_trait]
impl VaultReads for PoolReader {
    async fn vault_rate(&self, vault: Address) -> Result<U256, TradeError> {
        Ok(self.view(vault, getRateCall {}).await?.rate)
    }

    async fn vault_total_supply(&self, vault: Address) -> Result<U256, TradeError> {
        Ok(self.view(vault, totalSupplyCall {}).await?.supply)
    }

    async fn lp_position(&self, pool: Address, lp: Address) -> Result<LpPosition, TradeError> {
        let info = self.view(pool, positionLPInfoCall { _lp: lp }).await?.info;
        Ok(LpPosition {
            actual_collateral: info.actualCollateralAmount,
            tokens_collateralized: info.tokensCollateralized,
            overcollateralization: info.overCollateralization,
            capacity: info.capacity,
            utilization: info.utilization,
            coverage: info.coverage,
            mint_shares: info.mintShares,
            redeem_shares: info.redeemShares,
            interest_shares: info.interestShares,
            is_overcollateralized: info.isOvercollateralized,
        })
    }
}

#[async_trait]
impl FaucetReads for PoolReader {
    async fn faucet_allotment(
        &self,
        faucet: Address,
        user: Address,
    ) -> Result<FaucetAllotment, TradeError> {
        let remaining = self
            .view(faucet, getRemainingDailyLimitCall { user })
            .await?
            .remaining;
        let until_reset = self
            .view(faucet, getTimeUntilResetCall { user })
            .await?
            .timeUntilReset;
        let daily_limit = self.view(faucet, DAILY_LIMITCall {}).await?.limit;
        Ok(FaucetAllotment {
            remaining,
            seconds_until_reset: u64::try_from(until_reset).unwrap_or(u64::MAX),
            daily_limit,
        })
    }
}

#[async_trait]
impl Erc20Reads for PoolReader {
    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256, TradeError> {
        Ok(self.view(token, balanceOfCall { _owner: owner }).await?.balance)
    }

    async fn allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, TradeError> {
        let call = allowanceCall { _owner: owner, _spender: spender };
        Ok(self.view(token, call).await?.remaining)
    }
}

#[async_trait]
impl EventScan for PoolReader {
    async fn latest_block(&self) -> Result<u64, TradeError> {
        self.provider.block_number().await
    }

    async fn pool_events(
        &self,
        pool: Address,
        user: Address,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<PoolEvent>, TradeError> {
        // One query for both event kinds: OR on topic0, user on topic1.
        let topics: Vec<Vec<B256>> = vec![
            vec![Minted::SIGNATURE_HASH, Redeemed::SIGNATURE_HASH],
            vec![user.into_word()],
        ];
        let logs = self
            .provider
            .get_logs(pool, &topics, from_block, to_block)
            .await?;

        let mut events = Vec::with_capacity(logs.len());
        for log in logs {
            let block_number = log.block_number()?;
            let topic0 = match log.topics.first() {
                Some(t) => *t,
                None => continue,
            };

            let decoded = if topic0 == Minted::SIGNATURE_HASH {
                Minted::decode_raw_log(log.topics.iter().copied(), &log.data, true).map(|e| {
                    PoolEvent {
                        kind: PoolEventKind::Minted,
                        pool,
                        user: e.user,
                        tx_hash: log.transaction_hash,
                        block_number,
                        collateral_raw: e.mintvalues.totalCollateral,
                        synthetic_raw: e.mintvalues.numTokens,
                        fee_raw: e.mintvalues.feeAmount,
                    }
                })
            } else if topic0 == Redeemed::SIGNATURE_HASH {
                Redeemed::decode_raw_log(log.topics.iter().copied(), &log.data, true).map(|e| {
                    PoolEvent {
                        kind: PoolEventKind::Redeemed,
                        pool,
                        user: e.user,
                        tx_hash: log.transaction_hash,
                        block_number,
                        collateral_raw: e.redeemvalues.collateralAmount,
                        synthetic_raw: e.redeemvalues.numTokens,
                        fee_raw: e.redeemvalues.feeAmount,
                    }
                })
            } else {
                continue;
            };

            match decoded {
                Ok(event) => events.push(event),
                Err(e) => {
                    // A malformed log must not sink the whole scan.
                    warn!(pool = %pool, error = %e, "skipping undecodable pool event");
                }
            }
        }
        Ok(events)
    }
}
