//! Calldata construction and submission through the connected wallet.

use crate::abi::{
    MintParams, RedeemParams, approveCall, claimFDUSDCall, depositCall, mintCall, redeemCall,
    withdrawCall,
};
use crate::traits::{TxHash, TxReceipt, WalletProvider};
use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;
use std::sync::Arc;
use synthswap_domain::prelude::{TradeDirection, TradeError, TradeIntent};
use tracing::info;

/// Builds the calldata for an ERC20 `approve(spender, amount)`.
#[must_use]
pub fn approve_calldata(spender: Address, amount: U256) -> Vec<u8> {
    approveCall { _spender: spender, _value: amount }.abi_encode()
}

/// Builds the mint/redeem calldata for a trade intent, applying the
/// slippage floor to the quoted minimum output.
#[must_use]
pub fn trade_calldata(intent: &TradeIntent) -> Vec<u8> {
    let adjusted_min = intent.adjusted_min_output();
    let expiration = U256::from(intent.expiration_unix);
    match intent.direction {
        TradeDirection::Mint => mintCall {
            mintParams: MintParams {
                minNumTokens: adjusted_min,
                collateralAmount: intent.input.raw,
                expiration,
                recipient: intent.recipient,
            },
        }
        .abi_encode(),
        TradeDirection::Redeem => redeemCall {
            redeemParams: RedeemParams {
                numTokens: intent.input.raw,
                minCollateral: adjusted_min,
                expiration,
                recipient: intent.recipient,
            },
        }
        .abi_encode(),
    }
}

/// Builds the calldata for a vault `deposit(collateralAmount, recipient)`.
#[must_use]
pub fn deposit_calldata(amount: U256, recipient: Address) -> Vec<u8> {
    depositCall {
        collateralAmount: amount,
        recipient,
    }
    .abi_encode()
}

/// Builds the calldata for a vault `withdraw(lpTokensAmount, recipient)`.
#[must_use]
pub fn withdraw_calldata(lp_amount: U256, recipient: Address) -> Vec<u8> {
    withdrawCall {
        lpTokensAmount: lp_amount,
        recipient,
    }
    .abi_encode()
}

/// Builds the calldata for a faucet `claimFDUSD(amount)`.
#[must_use]
pub fn claim_calldata(amount: U256) -> Vec<u8> {
    claimFDUSDCall { amount }.abi_encode()
}

/// Submits approvals and trades through a wallet and awaits confirmation.
pub struct TradeSubmitter<W: WalletProvider> {
    wallet: Arc<W>,
}

impl<W: WalletProvider> TradeSubmitter<W> {
    pub fn new(wallet: Arc<W>) -> Self {
        Self { wallet }
    }

    /// The connected account.
    pub fn account(&self) -> Address {
        self.wallet.account()
    }

    /// Broadcasts an ERC20 approval.
    pub async fn approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> Result<TxHash, TradeError> {
        info!(token = %token, spender = %spender, amount = %amount, "submitting approval");
        self.wallet
            .send_transaction(token, approve_calldata(spender, amount))
            .await
    }

    /// Broadcasts the mint/redeem call for an intent.
    pub async fn submit_trade(&self, intent: &TradeIntent) -> Result<TxHash, TradeError> {
        info!(
            pool = %intent.pool.address,
            direction = %intent.direction,
            input = %intent.input,
            min_output = %intent.adjusted_min_output(),
            expiration = intent.expiration_unix,
            "submitting trade"
        );
        self.wallet
            .send_transaction(intent.pool.address, trade_calldata(intent))
            .await
    }

    /// Broadcasts a vault deposit.
    pub async fn deposit(
        &self,
        vault: Address,
        amount: U256,
        recipient: Address,
    ) -> Result<TxHash, TradeError> {
        info!(vault = %vault, amount = %amount, "submitting vault deposit");
        self.wallet
            .send_transaction(vault, deposit_calldata(amount, recipient))
            .await
    }

    /// Broadcasts a vault withdrawal.
    pub async fn withdraw(
        &self,
        vault: Address,
        lp_amount: U256,
        recipient: Address,
    ) -> Result<TxHash, TradeError> {
        info!(vault = %vault, lp_amount = %lp_amount, "submitting vault withdrawal");
        self.wallet
            .send_transaction(vault, withdraw_calldata(lp_amount, recipient))
            .await
    }

    /// Broadcasts a faucet claim.
    pub async fn claim(&self, faucet: Address, amount: U256) -> Result<TxHash, TradeError> {
        info!(faucet = %faucet, amount = %amount, "submitting faucet claim");
        self.wallet
            .send_transaction(faucet, claim_calldata(amount))
            .await
    }

    /// Waits for a receipt; a mined-but-reverted transaction becomes a
    /// [`TradeError::ContractReverted`].
    pub async fn wait(&self, tx_hash: TxHash) -> Result<TxReceipt, TradeError> {
        let receipt = self.wallet.wait_for_receipt(tx_hash).await?;
        if receipt.success {
            Ok(receipt)
        } else {
            Err(TradeError::ContractReverted(format!(
                "transaction {tx_hash} reverted"
            )))
        }
    }
}
