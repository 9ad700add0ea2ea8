//! Historical mint/redeem activity.
//!
//! Read-only: populates an activity list from `Minted`/`Redeemed` logs over
//! a bounded lookback window. Not decision-relevant to the orchestrator.

use crate::config::EngineConfig;
use alloy_primitives::Address;
use std::sync::Arc;
use synthswap_chain::prelude::{EventScan, PoolEventKind, TxHash};
use synthswap_domain::prelude::{Amount, PoolRegistry, TokenCatalog, TradeError};
use tracing::warn;

/// One historical trade, formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeRecord {
    pub kind: PoolEventKind,
    pub pool_name: String,
    pub pool_symbol: String,
    pub collateral_symbol: String,
    pub tx_hash: TxHash,
    pub block_number: u64,
    pub collateral_amount: String,
    pub synthetic_amount: String,
    pub fee_amount: String,
}

/// Scans the configured pools for a user's recent activity.
pub struct TradeHistory<S: EventScan> {
    scanner: Arc<S>,
    registry: Arc<PoolRegistry>,
    catalog: TokenCatalog,
    config: EngineConfig,
}

impl<S: EventScan> TradeHistory<S> {
    pub fn new(
        scanner: Arc<S>,
        registry: Arc<PoolRegistry>,
        catalog: TokenCatalog,
        config: EngineConfig,
    ) -> Self {
        Self {
            scanner,
            registry,
            catalog,
            config,
        }
    }

    /// The user's most recent trades across all pools, newest first,
    /// bounded by the configured lookback and limit.
    ///
    /// A pool whose scan fails is skipped rather than sinking the whole
    /// listing.
    pub async fn recent(&self, user: Address) -> Result<Vec<TradeRecord>, TradeError> {
        let latest = self.scanner.latest_block().await?;
        let from_block = latest.saturating_sub(self.config.history_lookback_blocks);

        let mut records = Vec::new();
        for pool in self.registry.pools() {
            let events = match self
                .scanner
                .pool_events(pool.address, user, from_block, latest)
                .await
            {
                Ok(events) => events,
                Err(error) => {
                    warn!(pool = %pool.address, error = %error, "skipping pool in history scan");
                    continue;
                }
            };

            let collateral_decimals = self.catalog.decimals_of(pool.collateral_token);
            let synthetic_decimals = self.catalog.decimals_of(pool.synthetic_token);

            records.extend(events.into_iter().map(|event| TradeRecord {
                kind: event.kind,
                pool_name: pool.name.clone(),
                pool_symbol: pool.symbol.clone(),
                collateral_symbol: pool.collateral_symbol.clone(),
                tx_hash: event.tx_hash,
                block_number: event.block_number,
                collateral_amount: Amount::new(event.collateral_raw, collateral_decimals).format(),
                synthetic_amount: Amount::new(event.synthetic_raw, synthetic_decimals).format(),
                fee_amount: Amount::new(event.fee_raw, collateral_decimals).format(),
            }));
        }

        records.sort_by(|a, b| b.block_number.cmp(&a.block_number));
        records.truncate(self.config.history_limit);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockChain;
    use alloy_primitives::{B256, U256};
    use synthswap_chain::prelude::PoolEvent;
    use synthswap_domain::presets;

    fn event(pool: Address, user: Address, block: u64, kind: PoolEventKind) -> PoolEvent {
        PoolEvent {
            kind,
            pool,
            user,
            tx_hash: B256::from(U256::from(block)),
            block_number: block,
            collateral_raw: U256::from(1_000_000_000_000_000_000u128), // 1.0
            synthetic_raw: U256::from(920_000_000_000_000_000u128),    // 0.92
            fee_raw: U256::from(1_500_000_000_000_000u128),            // 0.0015
        }
    }

    #[tokio::test]
    async fn test_recent_sorts_and_limits() {
        let chain = Arc::new(MockChain::new());
        let registry = Arc::new(presets::default_registry());
        let user = Address::repeat_byte(0x42);
        let pool = registry.pools()[0].address;

        chain.set_latest_block(100_000);
        chain.set_events(
            (1..=15)
                .map(|i| event(pool, user, 99_000 + i, PoolEventKind::Minted))
                .collect(),
        );

        let config = EngineConfig {
            history_limit: 10,
            ..EngineConfig::default()
        };
        let history = TradeHistory::new(chain, registry, presets::default_tokens(), config);

        let records = history.recent(user).await.unwrap();
        assert_eq!(records.len(), 10);
        assert_eq!(records[0].block_number, 99_015);
        assert!(records.windows(2).all(|w| w[0].block_number >= w[1].block_number));
        assert_eq!(records[0].collateral_amount, "1.000000000000000000");
    }

    #[tokio::test]
    async fn test_lookback_bounds_the_scan() {
        let chain = Arc::new(MockChain::new());
        let registry = Arc::new(presets::default_registry());
        let user = Address::repeat_byte(0x42);
        let pool = registry.pools()[0].address;

        chain.set_latest_block(100_000);
        chain.set_events(vec![
            event(pool, user, 80_000, PoolEventKind::Minted), // beyond lookback
            event(pool, user, 95_000, PoolEventKind::Redeemed),
        ]);

        let history = TradeHistory::new(
            chain,
            registry,
            presets::default_tokens(),
            EngineConfig::default(),
        );
        let records = history.recent(user).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, PoolEventKind::Redeemed);
    }

    #[tokio::test]
    async fn test_other_users_filtered_out() {
        let chain = Arc::new(MockChain::new());
        let registry = Arc::new(presets::default_registry());
        let pool = registry.pools()[0].address;

        chain.set_events(vec![event(
            pool,
            Address::repeat_byte(0x99),
            99_500,
            PoolEventKind::Minted,
        )]);

        let history = TradeHistory::new(
            chain,
            registry,
            presets::default_tokens(),
            EngineConfig::default(),
        );
        let records = history.recent(Address::repeat_byte(0x42)).await.unwrap();
        assert!(records.is_empty());
    }
}
