//! In-memory chain and wallet doubles for engine tests.

use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use synthswap_chain::abi::{approveCall, claimFDUSDCall};
use synthswap_chain::prelude::{
    CollateralBreakdown, Erc20Reads, EventScan, FaucetAllotment, FaucetReads, LpPosition,
    PoolEvent, PoolReads, TxHash, TxReceipt, VaultReads, WalletProvider,
};
use synthswap_domain::prelude::TradeError;

/// Programmable chain double.
///
/// Quotes are deterministic: output = 98.5% of input, fee = 0.15%.
pub struct MockChain {
    allowance: Mutex<U256>,
    balance: Mutex<U256>,
    quote_calls: AtomicU64,
    fail_quotes: Mutex<bool>,
    fail_erc20: Mutex<bool>,
    quote_delays_ms: Mutex<HashMap<U256, u64>>,
    events: Mutex<Vec<PoolEvent>>,
    latest_block: Mutex<u64>,
    vault_rate: Mutex<U256>,
    vault_supply: Mutex<U256>,
    faucet_remaining: Mutex<U256>,
    faucet_reset_in: Mutex<u64>,
}

/// 500 tokens at 18 decimals, the mock faucet's daily cap.
fn faucet_daily_limit() -> U256 {
    U256::from(500u64) * U256::from(10u64).pow(U256::from(18u64))
}

impl MockChain {
    pub fn new() -> Self {
        Self {
            allowance: Mutex::new(U256::ZERO),
            balance: Mutex::new(U256::MAX),
            quote_calls: AtomicU64::new(0),
            fail_quotes: Mutex::new(false),
            fail_erc20: Mutex::new(false),
            quote_delays_ms: Mutex::new(HashMap::new()),
            events: Mutex::new(Vec::new()),
            latest_block: Mutex::new(100_000),
            vault_rate: Mutex::new(U256::from(10u64).pow(U256::from(18u64))),
            vault_supply: Mutex::new(U256::from(1_000_000u64)),
            faucet_remaining: Mutex::new(faucet_daily_limit()),
            faucet_reset_in: Mutex::new(0),
        }
    }

    pub fn set_vault_rate(&self, value: U256) {
        *self.vault_rate.lock().unwrap() = value;
    }

    pub fn set_faucet_remaining(&self, value: U256) {
        *self.faucet_remaining.lock().unwrap() = value;
    }

    pub fn set_faucet_reset_in(&self, seconds: u64) {
        *self.faucet_reset_in.lock().unwrap() = seconds;
    }

    pub fn faucet_remaining(&self) -> U256 {
        *self.faucet_remaining.lock().unwrap()
    }

    fn draw_down_faucet(&self, amount: U256) {
        let mut remaining = self.faucet_remaining.lock().unwrap();
        *remaining = remaining.saturating_sub(amount);
    }

    pub fn set_allowance(&self, value: U256) {
        *self.allowance.lock().unwrap() = value;
    }

    pub fn set_balance(&self, value: U256) {
        *self.balance.lock().unwrap() = value;
    }

    pub fn fail_quotes(&self) {
        *self.fail_quotes.lock().unwrap() = true;
    }

    pub fn fail_erc20_reads(&self) {
        *self.fail_erc20.lock().unwrap() = true;
    }

    /// Delays the quote response for a given human 18-decimals amount.
    pub fn set_quote_delay_ms(&self, human_amount: &str, delay_ms: u64) {
        let raw = synthswap_domain::prelude::Amount::parse(human_amount, 18)
            .unwrap()
            .raw;
        self.quote_delays_ms.lock().unwrap().insert(raw, delay_ms);
    }

    pub fn quote_calls(&self) -> u64 {
        self.quote_calls.load(Ordering::SeqCst)
    }

    pub fn set_events(&self, events: Vec<PoolEvent>) {
        *self.events.lock().unwrap() = events;
    }

    pub fn set_latest_block(&self, block: u64) {
        *self.latest_block.lock().unwrap() = block;
    }

    async fn quote(&self, input: U256) -> Result<(U256, U256), TradeError> {
        self.quote_calls.fetch_add(1, Ordering::SeqCst);
        let delay = self.quote_delays_ms.lock().unwrap().get(&input).copied();
        if let Some(ms) = delay {
            tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
        }
        if *self.fail_quotes.lock().unwrap() {
            return Err(TradeError::ContractReverted("pool paused".into()));
        }
        let output = input * U256::from(985u64) / U256::from(1000u64);
        let fee = input * U256::from(15u64) / U256::from(10_000u64);
        Ok((output, fee))
    }
}

#[async_trait]
impl PoolReads for MockChain {
    async fn mint_quote(
        &self,
        _pool: Address,
        collateral_in: U256,
    ) -> Result<(U256, U256), TradeError> {
        self.quote(collateral_in).await
    }

    async fn redeem_quote(
        &self,
        _pool: Address,
        synthetic_in: U256,
    ) -> Result<(U256, U256), TradeError> {
        self.quote(synthetic_in).await
    }

    async fn fee_percentage(&self, _pool: Address) -> Result<U256, TradeError> {
        Ok(U256::from(1_500_000_000_000_000u64)) // 0.15%, 18 decimals
    }

    async fn total_synthetic_tokens(&self, _pool: Address) -> Result<U256, TradeError> {
        Ok(U256::from(1_000_000u64))
    }

    async fn total_collateral(&self, _pool: Address) -> Result<CollateralBreakdown, TradeError> {
        Ok(CollateralBreakdown {
            users_collateral: U256::from(600_000u64),
            lps_collateral: U256::from(400_000u64),
            total_collateral: U256::from(1_000_000u64),
        })
    }
}

#[async_trait]
impl VaultReads for MockChain {
    async fn vault_rate(&self, _vault: Address) -> Result<U256, TradeError> {
        Ok(*self.vault_rate.lock().unwrap())
    }

    async fn vault_total_supply(&self, _vault: Address) -> Result<U256, TradeError> {
        Ok(*self.vault_supply.lock().unwrap())
    }

    async fn lp_position(&self, _pool: Address, _lp: Address) -> Result<LpPosition, TradeError> {
        Ok(LpPosition {
            actual_collateral: U256::from(800_000u64),
            tokens_collateralized: U256::from(700_000u64),
            overcollateralization: U256::from(110u64),
            capacity: U256::from(200_000u64),
            utilization: U256::from(78u64),
            coverage: U256::from(125u64),
            mint_shares: U256::from(40u64),
            redeem_shares: U256::from(40u64),
            interest_shares: U256::from(20u64),
            is_overcollateralized: true,
        })
    }
}

#[async_trait]
impl FaucetReads for MockChain {
    async fn faucet_allotment(
        &self,
        _faucet: Address,
        _user: Address,
    ) -> Result<FaucetAllotment, TradeError> {
        Ok(FaucetAllotment {
            remaining: *self.faucet_remaining.lock().unwrap(),
            seconds_until_reset: *self.faucet_reset_in.lock().unwrap(),
            daily_limit: faucet_daily_limit(),
        })
    }
}

#[async_trait]
impl Erc20Reads for MockChain {
    async fn balance_of(&self, _token: Address, _owner: Address) -> Result<U256, TradeError> {
        if *self.fail_erc20.lock().unwrap() {
            return Err(TradeError::Network("connection refused".into()));
        }
        Ok(*self.balance.lock().unwrap())
    }

    async fn allowance(
        &self,
        _token: Address,
        _owner: Address,
        _spender: Address,
    ) -> Result<U256, TradeError> {
        if *self.fail_erc20.lock().unwrap() {
            return Err(TradeError::Network("connection refused".into()));
        }
        Ok(*self.allowance.lock().unwrap())
    }
}

#[async_trait]
impl EventScan for MockChain {
    async fn latest_block(&self) -> Result<u64, TradeError> {
        Ok(*self.latest_block.lock().unwrap())
    }

    async fn pool_events(
        &self,
        pool: Address,
        user: Address,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<PoolEvent>, TradeError> {
        Ok(self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| {
                e.pool == pool
                    && e.user == user
                    && e.block_number >= from_block
                    && e.block_number <= to_block
            })
            .cloned()
            .collect())
    }
}

enum PendingEffect {
    /// Apply this allowance on the chain double once the tx "mines".
    SetAllowance(U256),
    /// Draw down the faucet allotment once the tx "mines".
    FaucetClaim(U256),
    None,
}

/// Wallet double. Approvals take effect on the linked [`MockChain`] when
/// the receipt is awaited, mimicking on-chain confirmation ordering.
pub struct MockWallet {
    account: Address,
    chain: std::sync::Arc<MockChain>,
    next_hash: AtomicU64,
    pending: Mutex<HashMap<TxHash, PendingEffect>>,
    reject_next_send: Mutex<bool>,
    revert_next_receipt: Mutex<bool>,
    receipt_delay_ms: Mutex<u64>,
    pub sent: Mutex<Vec<(Address, Vec<u8>)>>,
}

impl MockWallet {
    pub fn new(chain: std::sync::Arc<MockChain>) -> Self {
        Self {
            account: Address::repeat_byte(0x42),
            chain,
            next_hash: AtomicU64::new(1),
            pending: Mutex::new(HashMap::new()),
            reject_next_send: Mutex::new(false),
            revert_next_receipt: Mutex::new(false),
            receipt_delay_ms: Mutex::new(0),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Keeps every transaction "mining" for the given time.
    pub fn delay_receipts_ms(&self, ms: u64) {
        *self.receipt_delay_ms.lock().unwrap() = ms;
    }

    pub fn reject_next_send(&self) {
        *self.reject_next_send.lock().unwrap() = true;
    }

    pub fn revert_next_receipt(&self) {
        *self.revert_next_receipt.lock().unwrap() = true;
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    fn account(&self) -> Address {
        self.account
    }

    async fn send_transaction(&self, to: Address, calldata: Vec<u8>) -> Result<TxHash, TradeError> {
        if std::mem::take(&mut *self.reject_next_send.lock().unwrap()) {
            return Err(TradeError::UserRejected);
        }

        let effect = if let Ok(approval) = approveCall::abi_decode(&calldata, true) {
            PendingEffect::SetAllowance(approval._value)
        } else if let Ok(claim) = claimFDUSDCall::abi_decode(&calldata, true) {
            PendingEffect::FaucetClaim(claim.amount)
        } else {
            PendingEffect::None
        };

        let hash = B256::from(U256::from(self.next_hash.fetch_add(1, Ordering::SeqCst)));
        self.pending.lock().unwrap().insert(hash, effect);
        self.sent.lock().unwrap().push((to, calldata));
        Ok(hash)
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<TxReceipt, TradeError> {
        let delay = *self.receipt_delay_ms.lock().unwrap();
        if delay > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
        }

        let reverted = std::mem::take(&mut *self.revert_next_receipt.lock().unwrap());
        if !reverted {
            match self.pending.lock().unwrap().remove(&tx_hash) {
                Some(PendingEffect::SetAllowance(value)) => self.chain.set_allowance(value),
                Some(PendingEffect::FaucetClaim(amount)) => self.chain.draw_down_faucet(amount),
                _ => {}
            }
        }
        Ok(TxReceipt {
            tx_hash,
            block_number: 100_001,
            success: !reverted,
        })
    }
}
