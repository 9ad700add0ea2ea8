//! Test-collateral faucet: claim status and rate-limited claims.

use alloy_primitives::Address;
use std::sync::Arc;
use synthswap_chain::prelude::{FaucetAllotment, FaucetReads, TradeSubmitter, TxReceipt, WalletProvider};
use synthswap_domain::prelude::{Amount, TradeError};
use tracing::info;

/// The standard claim, in human units of the dispensed token.
pub const STANDARD_CLAIM: &str = "500";

/// Faucet assets are 18 decimals.
const FAUCET_DECIMALS: u8 = 18;

/// Reads the faucet allotment and submits claims through the wallet.
pub struct FaucetService<C, W>
where
    C: FaucetReads,
    W: WalletProvider,
{
    reader: Arc<C>,
    submitter: TradeSubmitter<W>,
    faucet: Address,
}

impl<C, W> FaucetService<C, W>
where
    C: FaucetReads,
    W: WalletProvider,
{
    pub fn new(reader: Arc<C>, wallet: Arc<W>, faucet: Address) -> Self {
        Self {
            reader,
            submitter: TradeSubmitter::new(wallet),
            faucet,
        }
    }

    /// The connected account's current allotment.
    pub async fn status(&self) -> Result<FaucetAllotment, TradeError> {
        self.reader
            .faucet_allotment(self.faucet, self.submitter.account())
            .await
    }

    /// Claims `amount_text` of the dispensed token.
    ///
    /// A claim above the remaining daily allotment is refused locally with
    /// the shortfall, instead of submitting a guaranteed revert.
    pub async fn claim(&self, amount_text: &str) -> Result<TxReceipt, TradeError> {
        let amount = Amount::parse(amount_text, FAUCET_DECIMALS)?;
        if amount.is_zero() {
            return Err(TradeError::InvalidAmount(amount_text.to_string()));
        }

        let allotment = self.status().await?;
        if amount.raw > allotment.remaining {
            return Err(TradeError::InsufficientFunds(format!(
                "daily faucet limit reached, {} remaining",
                Amount::new(allotment.remaining, FAUCET_DECIMALS)
            )));
        }

        let tx_hash = self.submitter.claim(self.faucet, amount.raw).await?;
        let receipt = self.submitter.wait(tx_hash).await?;
        info!(tx_hash = %receipt.tx_hash, amount = %amount, "faucet claim confirmed");
        Ok(receipt)
    }
}
