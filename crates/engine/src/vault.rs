//! LP vault management: overview reads plus deposit/withdraw submission.
//!
//! Deposits spend the vault's collateral token and are gated by the same
//! fail-closed allowance rule as trades, with the vault as spender.
//! Withdrawals spend the vault's own LP token, which needs no allowance.

use crate::allowance::AllowanceGate;
use alloy_primitives::{Address, U256};
use std::sync::Arc;
use synthswap_chain::prelude::{
    Erc20Reads, LpPosition, TradeSubmitter, TxReceipt, VaultReads, WalletProvider,
};
use synthswap_domain::prelude::{Amount, Token, TradeError, Vault};
use tracing::warn;

/// Every vault asset on the target chain is 18 decimals.
const VAULT_DECIMALS: u8 = 18;

/// Live snapshot of a vault, for the vaults dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultOverview {
    pub vault: Vault,
    /// LP token rate, raw 18-decimals fixed point.
    pub rate: U256,
    /// Outstanding LP token supply.
    pub total_supply: U256,
    /// The owner's LP token balance.
    pub lp_balance: U256,
    /// The vault's position in its pool.
    pub position: LpPosition,
}

/// Reads vault state and drives deposits/withdrawals through the wallet.
pub struct VaultManager<C, W>
where
    C: VaultReads + Erc20Reads,
    W: WalletProvider,
{
    chain: Arc<C>,
    gate: AllowanceGate<C>,
    submitter: TradeSubmitter<W>,
}

impl<C, W> VaultManager<C, W>
where
    C: VaultReads + Erc20Reads,
    W: WalletProvider,
{
    pub fn new(chain: Arc<C>, wallet: Arc<W>) -> Self {
        Self {
            chain: chain.clone(),
            gate: AllowanceGate::new(chain),
            submitter: TradeSubmitter::new(wallet),
        }
    }

    /// Rate, supply, the owner's LP balance and the vault's pool position.
    pub async fn overview(
        &self,
        vault: &Vault,
        owner: Address,
    ) -> Result<VaultOverview, TradeError> {
        let rate = self.chain.vault_rate(vault.address).await?;
        let total_supply = self.chain.vault_total_supply(vault.address).await?;
        let lp_balance = self.chain.balance_of(vault.address, owner).await?;
        let position = self.chain.lp_position(vault.pool, vault.address).await?;
        Ok(VaultOverview {
            vault: vault.clone(),
            rate,
            total_supply,
            lp_balance,
            position,
        })
    }

    /// Approves the vault to spend the collateral token.
    pub async fn approve_collateral(
        &self,
        vault: &Vault,
        collateral: &Token,
        amount: &Amount,
    ) -> Result<TxReceipt, TradeError> {
        let tx_hash = self
            .submitter
            .approve(collateral.address, vault.address, amount.raw)
            .await?;
        self.submitter.wait(tx_hash).await
    }

    /// Deposits collateral into the vault, crediting LP tokens to the
    /// connected account.
    ///
    /// Fails closed on the allowance: an insufficient or unreadable
    /// allowance refuses the deposit before anything reaches the wallet.
    pub async fn deposit(
        &self,
        vault: &Vault,
        collateral: &Token,
        amount_text: &str,
    ) -> Result<TxReceipt, TradeError> {
        let amount = Amount::parse(amount_text, collateral.decimals)?;
        if amount.is_zero() {
            return Err(TradeError::InvalidAmount(amount_text.to_string()));
        }

        let owner = self.submitter.account();
        let state = match self
            .gate
            .check(collateral, owner, vault.address, amount.raw)
            .await
        {
            Ok(state) => state,
            Err(error) => {
                warn!(vault = %vault.address, error = %error, "allowance unknown, refusing deposit");
                return Err(TradeError::InsufficientAllowance {
                    allowance: U256::ZERO,
                    required: amount.raw,
                });
            }
        };
        if !state.is_sufficient() {
            return Err(TradeError::InsufficientAllowance {
                allowance: state.allowance,
                required: state.required,
            });
        }

        let tx_hash = self
            .submitter
            .deposit(vault.address, amount.raw, owner)
            .await?;
        self.submitter.wait(tx_hash).await
    }

    /// Withdraws by burning vault LP tokens; no allowance is involved.
    pub async fn withdraw(
        &self,
        vault: &Vault,
        lp_amount_text: &str,
    ) -> Result<TxReceipt, TradeError> {
        let lp_amount = Amount::parse(lp_amount_text, VAULT_DECIMALS)?;
        if lp_amount.is_zero() {
            return Err(TradeError::InvalidAmount(lp_amount_text.to_string()));
        }

        let recipient = self.submitter.account();
        let tx_hash = self
            .submitter
            .withdraw(vault.address, lp_amount.raw, recipient)
            .await?;
        self.submitter.wait(tx_hash).await
    }
}
