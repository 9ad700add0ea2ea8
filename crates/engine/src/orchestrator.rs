//! The approve-then-trade state machine.
//!
//! Phases:
//! `Idle → Quoting → (InsufficientAllowance | ReadyToTrade) → Approving →
//! ReadyToTrade → Submitting → Confirming → (Success | Failed)`
//!
//! Editing the input while quoting aborts the in-flight quote and restarts
//! for the new parameters; it never cancels a transaction that has already
//! been handed to the wallet. Every failure is classified and parks the
//! machine in `Failed`, from where `reset` returns to a re-attemptable
//! phase.

use crate::allowance::AllowanceGate;
use crate::config::EngineConfig;
use crate::quote::{QuoteService, QuoteStatus};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use synthswap_chain::prelude::{
    Erc20Reads, PoolReads, TradeSubmitter, TxHash, TxReceipt, WalletProvider,
};
use synthswap_domain::prelude::{
    AllowanceState, Amount, Pool, PoolRegistry, Quote, Token, TradeDirection, TradeError,
    TradeIntent,
};
use tokio::sync::RwLock;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Lifecycle phase of the current trade attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TradePhase {
    #[default]
    Idle,
    Quoting,
    InsufficientAllowance,
    ReadyToTrade,
    Approving,
    Submitting,
    Confirming,
    Success,
    Failed,
}

impl TradePhase {
    /// Whether the trade action should be enabled.
    #[must_use]
    pub fn can_trade(&self) -> bool {
        matches!(self, Self::ReadyToTrade)
    }

    /// Whether an on-chain transaction is outstanding; input changes must
    /// not disturb these phases.
    #[must_use]
    pub fn has_pending_transaction(&self) -> bool {
        matches!(self, Self::Approving | Self::Submitting | Self::Confirming)
    }
}

/// Snapshot of the machine for the presentation layer.
#[derive(Debug, Clone, Default)]
pub struct TradeState {
    pub phase: TradePhase,
    pub pool: Option<Pool>,
    pub direction: Option<TradeDirection>,
    pub from: Option<Token>,
    pub to: Option<Token>,
    pub input: Option<Amount>,
    pub quote: Option<Quote>,
    pub allowance: Option<AllowanceState>,
    pub last_error: Option<TradeError>,
    pub tx_hash: Option<TxHash>,
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Drives quoting, allowance gating and trade submission.
pub struct TradeOrchestrator<C, W>
where
    C: PoolReads + Erc20Reads + 'static,
    W: WalletProvider,
{
    registry: Arc<PoolRegistry>,
    chain: Arc<C>,
    quotes: QuoteService<C>,
    gate: AllowanceGate<C>,
    submitter: TradeSubmitter<W>,
    config: EngineConfig,
    /// Bumped on every input change; awaited steps belonging to an older
    /// epoch discard their results (last-request-wins).
    epoch: AtomicU64,
    state: Arc<RwLock<TradeState>>,
}

impl<C, W> TradeOrchestrator<C, W>
where
    C: PoolReads + Erc20Reads + 'static,
    W: WalletProvider,
{
    pub fn new(
        chain: Arc<C>,
        wallet: Arc<W>,
        registry: Arc<PoolRegistry>,
        config: EngineConfig,
    ) -> Self {
        Self {
            registry,
            chain: chain.clone(),
            quotes: QuoteService::new(chain.clone()),
            gate: AllowanceGate::new(chain),
            submitter: TradeSubmitter::new(wallet),
            config,
            epoch: AtomicU64::new(0),
            state: Arc::new(RwLock::new(TradeState::default())),
        }
    }

    pub async fn phase(&self) -> TradePhase {
        self.state.read().await.phase
    }

    pub async fn snapshot(&self) -> TradeState {
        self.state.read().await.clone()
    }

    /// Applies a new (from, to, amount) selection.
    ///
    /// Resolves the pool, classifies the direction, re-quotes and re-checks
    /// the allowance, then settles in `ReadyToTrade`,
    /// `InsufficientAllowance`, or `Idle` (no pool / empty input / quote
    /// unavailable). A no-op while a transaction is outstanding.
    pub async fn set_input(&self, from: &Token, to: &Token, amount_text: &str) -> TradePhase {
        {
            let state = self.state.read().await;
            if state.phase.has_pending_transaction() {
                debug!(phase = ?state.phase, "ignoring input change with transaction outstanding");
                return state.phase;
            }
        }

        let ticket = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;

        let Some(pool) = self.registry.resolve(from.address, to.address).cloned() else {
            let mut state = self.state.write().await;
            state.phase = TradePhase::Idle;
            state.pool = None;
            state.direction = None;
            state.from = Some(from.clone());
            state.to = Some(to.clone());
            state.input = None;
            state.quote = None;
            state.allowance = None;
            state.last_error = Some(TradeError::NoPoolAvailable);
            return state.phase;
        };

        // resolve() succeeded with this exact pair, so a direction exists.
        let Some(direction) = PoolRegistry::classify(from.address, to.address, &pool) else {
            let mut state = self.state.write().await;
            state.phase = TradePhase::Idle;
            state.last_error = Some(TradeError::NoPoolAvailable);
            return state.phase;
        };

        let input = match Amount::parse(amount_text, from.decimals) {
            Ok(amount) if !amount.is_zero() => amount,
            _ => {
                let mut state = self.state.write().await;
                state.phase = TradePhase::Idle;
                state.pool = Some(pool);
                state.direction = Some(direction);
                state.from = Some(from.clone());
                state.to = Some(to.clone());
                state.input = None;
                state.quote = None;
                state.allowance = None;
                state.last_error = None;
                return state.phase;
            }
        };

        {
            let mut state = self.state.write().await;
            state.phase = TradePhase::Quoting;
            state.pool = Some(pool.clone());
            state.direction = Some(direction);
            state.from = Some(from.clone());
            state.to = Some(to.clone());
            state.input = Some(input);
            state.quote = None;
            state.last_error = None;
            state.tx_hash = None;
        }

        let status = self.quotes.refresh(&pool, direction, from, to, amount_text).await;
        if self.epoch.load(Ordering::SeqCst) != ticket {
            debug!(ticket, "input changed during quote, keeping newer state");
            return self.state.read().await.phase;
        }

        let quote = match status {
            QuoteStatus::Ready(quote) => quote,
            QuoteStatus::Empty => {
                let mut state = self.state.write().await;
                if self.epoch.load(Ordering::SeqCst) != ticket {
                    return state.phase;
                }
                state.phase = TradePhase::Idle;
                return state.phase;
            }
            QuoteStatus::Loading | QuoteStatus::Unavailable => {
                let mut state = self.state.write().await;
                if self.epoch.load(Ordering::SeqCst) != ticket {
                    return state.phase;
                }
                state.phase = TradePhase::Idle;
                state.last_error =
                    Some(TradeError::QuoteUnavailable("pool view call failed".into()));
                return state.phase;
            }
        };

        let owner = self.submitter.account();
        let allowance = self.gate.check(from, owner, pool.address, input.raw).await;

        let mut state = self.state.write().await;
        // Re-check under the write guard: a newer refresh may have fully
        // completed between the await above and lock acquisition.
        if self.epoch.load(Ordering::SeqCst) != ticket {
            return state.phase;
        }
        state.quote = Some(quote);
        match allowance {
            Ok(allowance_state) => {
                state.phase = if allowance_state.is_sufficient() {
                    TradePhase::ReadyToTrade
                } else {
                    TradePhase::InsufficientAllowance
                };
                state.allowance = Some(allowance_state);
            }
            Err(error) => {
                // Fail closed: unknown allowance is insufficient.
                warn!(error = %error, "allowance unknown, gating trade");
                state.phase = TradePhase::InsufficientAllowance;
                state.allowance = None;
            }
        }
        state.phase
    }

    /// Submits an approval for the full input amount and waits for it to
    /// confirm, then re-reads the allowance before enabling the trade.
    pub async fn approve(&self) -> Result<TxReceipt, TradeError> {
        let (pool, from, input) = {
            let state = self.state.read().await;
            if state.phase != TradePhase::InsufficientAllowance {
                return Err(TradeError::NotReady("approval only applies when allowance is insufficient"));
            }
            match (&state.pool, &state.from, state.input) {
                (Some(pool), Some(from), Some(input)) => {
                    (pool.clone(), from.clone(), input)
                }
                _ => return Err(TradeError::NotReady("no pending trade parameters")),
            }
        };

        self.state.write().await.phase = TradePhase::Approving;

        let receipt = async {
            let tx_hash = self
                .submitter
                .approve(from.address, pool.address, input.raw)
                .await?;
            self.state.write().await.tx_hash = Some(tx_hash);
            self.submitter.wait(tx_hash).await
        }
        .await;

        match receipt {
            Ok(receipt) => {
                info!(tx_hash = %receipt.tx_hash, "approval confirmed");
                // Close the submission/confirmation race: only a fresh
                // allowance read may enable the trade.
                let allowance = self
                    .gate
                    .check(&from, self.submitter.account(), pool.address, input.raw)
                    .await;
                let mut state = self.state.write().await;
                match allowance {
                    Ok(allowance_state) if allowance_state.is_sufficient() => {
                        state.phase = TradePhase::ReadyToTrade;
                        state.allowance = Some(allowance_state);
                    }
                    Ok(allowance_state) => {
                        state.phase = TradePhase::InsufficientAllowance;
                        state.allowance = Some(allowance_state);
                    }
                    Err(_) => {
                        state.phase = TradePhase::InsufficientAllowance;
                        state.allowance = None;
                    }
                }
                Ok(receipt)
            }
            Err(error) => {
                warn!(error = %error, "approval failed");
                let mut state = self.state.write().await;
                state.phase = TradePhase::Failed;
                state.last_error = Some(error.clone());
                Err(error)
            }
        }
    }

    /// Builds the trade intent from the live quote and submits it.
    pub async fn execute(&self) -> Result<TxReceipt, TradeError> {
        let (pool, direction, input, quote) = {
            let state = self.state.read().await;
            if state.phase == TradePhase::InsufficientAllowance {
                let (allowance, required) = state
                    .allowance
                    .map(|a| (a.allowance, a.required))
                    .unwrap_or_default();
                return Err(TradeError::InsufficientAllowance { allowance, required });
            }
            if state.phase != TradePhase::ReadyToTrade {
                return Err(TradeError::NotReady("trade is not ready"));
            }
            match (&state.pool, state.direction, state.input, &state.quote) {
                (Some(pool), Some(direction), Some(input), Some(quote)) => {
                    (pool.clone(), direction, input, quote.clone())
                }
                _ => return Err(TradeError::NotReady("no live quote")),
            }
        };

        let intent = TradeIntent {
            pool,
            direction,
            input,
            min_output: quote.output,
            slippage: self.config.slippage(),
            expiration_unix: unix_now() + self.config.deadline_secs,
            recipient: self.submitter.account(),
        };

        self.state.write().await.phase = TradePhase::Submitting;

        let tx_hash = match self.submitter.submit_trade(&intent).await {
            Ok(tx_hash) => tx_hash,
            Err(error) => {
                warn!(error = %error, "trade submission failed");
                let mut state = self.state.write().await;
                state.phase = TradePhase::Failed;
                state.last_error = Some(error.clone());
                return Err(error);
            }
        };

        {
            let mut state = self.state.write().await;
            state.phase = TradePhase::Confirming;
            state.tx_hash = Some(tx_hash);
        }

        match self.submitter.wait(tx_hash).await {
            Ok(receipt) => {
                info!(tx_hash = %receipt.tx_hash, direction = %intent.direction, "trade confirmed");
                self.state.write().await.phase = TradePhase::Success;
                // Success surfaces immediately; the indexing-lag re-read
                // happens in the background.
                self.spawn_post_trade_refresh(&intent);
                Ok(receipt)
            }
            Err(error) => {
                warn!(tx_hash = %tx_hash, error = %error, "trade failed");
                let mut state = self.state.write().await;
                state.phase = TradePhase::Failed;
                state.last_error = Some(error.clone());
                Err(error)
            }
        }
    }

    /// Returns a terminal machine to a re-attemptable phase based on the
    /// cached quote and allowance.
    pub async fn reset(&self) -> TradePhase {
        let mut state = self.state.write().await;
        if state.phase.has_pending_transaction() {
            return state.phase;
        }
        state.last_error = None;
        state.tx_hash = None;
        state.phase = match (&state.quote, &state.allowance) {
            (Some(_), Some(allowance)) if allowance.is_sufficient() => TradePhase::ReadyToTrade,
            (Some(_), _) => TradePhase::InsufficientAllowance,
            _ => TradePhase::Idle,
        };
        state.phase
    }

    /// Schedules the delayed allowance re-read after a confirmed trade; RPC
    /// indexing lags the head block slightly.
    fn spawn_post_trade_refresh(&self, intent: &TradeIntent) {
        let gate = AllowanceGate::new(self.chain.clone());
        let state = self.state.clone();
        let owner = self.submitter.account();
        let pool = intent.pool.address;
        let delay = self.config.refresh_delay();

        tokio::spawn(async move {
            sleep(delay).await;

            let (from, input) = {
                let guard = state.read().await;
                match (&guard.from, guard.input) {
                    (Some(from), Some(input)) => (from.clone(), input),
                    _ => return,
                }
            };

            match gate.check(&from, owner, pool, input.raw).await {
                Ok(allowance_state) => {
                    state.write().await.allowance = Some(allowance_state);
                }
                Err(error) => {
                    warn!(error = %error, "post-trade allowance refresh failed");
                    state.write().await.allowance = None;
                }
            }
        });
    }
}
