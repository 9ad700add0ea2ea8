//! Quote fetching with last-request-wins staleness discarding.
//!
//! Every refresh gets a monotonically increasing ticket. A response whose
//! ticket is no longer the newest is dropped on the floor: a stale quote
//! belonging to a superseded input must never be displayed, regardless of
//! network response ordering.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use synthswap_chain::prelude::PoolReads;
use synthswap_domain::prelude::{Amount, Pool, Quote, Token, TradeDirection};
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Observable state of the quote slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum QuoteStatus {
    /// No input, or an input that parses to zero.
    #[default]
    Empty,
    /// A request is in flight.
    Loading,
    /// The latest non-stale response.
    Ready(Quote),
    /// The view call failed; callers show "quote unavailable" and keep the
    /// trade action disabled.
    Unavailable,
}

impl QuoteStatus {
    #[must_use]
    pub fn quote(&self) -> Option<&Quote> {
        match self {
            Self::Ready(quote) => Some(quote),
            _ => None,
        }
    }
}

struct Slot {
    ticket: u64,
    status: QuoteStatus,
}

/// Fetches quotes from the pool's view functions.
pub struct QuoteService<P: PoolReads> {
    reader: Arc<P>,
    seq: AtomicU64,
    slot: RwLock<Slot>,
}

impl<P: PoolReads> QuoteService<P> {
    pub fn new(reader: Arc<P>) -> Self {
        Self {
            reader,
            seq: AtomicU64::new(0),
            slot: RwLock::new(Slot {
                ticket: 0,
                status: QuoteStatus::Empty,
            }),
        }
    }

    /// The latest stored status.
    pub async fn status(&self) -> QuoteStatus {
        self.slot.read().await.status.clone()
    }

    /// Re-quotes for the given parameters and returns the resulting status.
    ///
    /// If another refresh started while this one's network round trip was
    /// outstanding, the response is discarded and the stored (newer) status
    /// is returned instead.
    pub async fn refresh(
        &self,
        pool: &Pool,
        direction: TradeDirection,
        from: &Token,
        to: &Token,
        amount_text: &str,
    ) -> QuoteStatus {
        let ticket = self.seq.fetch_add(1, Ordering::SeqCst) + 1;

        let input = match Amount::parse(amount_text, from.decimals) {
            Ok(amount) if !amount.is_zero() => amount,
            _ => {
                // Empty or zero input: neutral quote, no network call.
                self.store(ticket, QuoteStatus::Empty).await;
                return self.slot.read().await.status.clone();
            }
        };

        self.store(ticket, QuoteStatus::Loading).await;

        let result = match direction {
            TradeDirection::Mint => self.reader.mint_quote(pool.address, input.raw).await,
            TradeDirection::Redeem => self.reader.redeem_quote(pool.address, input.raw).await,
        };

        if self.seq.load(Ordering::SeqCst) != ticket {
            debug!(ticket, "discarding stale quote response");
            return self.slot.read().await.status.clone();
        }

        let status = match result {
            Ok((output_raw, fee_raw)) => {
                let output = Amount::new(output_raw, to.decimals);
                // The contract reports mint fees in the input (collateral)
                // token and redeem fees in the output (collateral) token.
                let fee_decimals = match direction {
                    TradeDirection::Mint => from.decimals,
                    TradeDirection::Redeem => to.decimals,
                };
                let fee = Amount::new(fee_raw, fee_decimals);
                QuoteStatus::Ready(Quote::from_trade_info(&input, output, fee))
            }
            Err(error) => {
                warn!(pool = %pool.address, direction = %direction, error = %error, "quote failed");
                QuoteStatus::Unavailable
            }
        };

        self.store(ticket, status).await;
        self.slot.read().await.status.clone()
    }

    async fn store(&self, ticket: u64, status: QuoteStatus) {
        let mut slot = self.slot.write().await;
        if ticket >= slot.ticket {
            slot.ticket = ticket;
            slot.status = status;
        }
    }
}
