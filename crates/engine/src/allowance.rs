//! Fail-closed allowance gating.
//!
//! Whatever token is being spent (collateral when minting, synthetic when
//! redeeming) must have sufficient allowance granted to the pool before the
//! trade call is attempted. An allowance that cannot be read counts as
//! insufficient: sufficiency is never assumed before data arrives.

use alloy_primitives::{Address, U256};
use std::sync::Arc;
use synthswap_chain::prelude::Erc20Reads;
use synthswap_domain::prelude::{AllowanceState, Amount, Token, TradeError};
use tracing::warn;

/// Reads and evaluates ERC20 allowances for a pending spend.
///
/// Refreshing is explicit: the orchestrator re-checks after an approval
/// confirms instead of polling on a timer, which would race the submission.
pub struct AllowanceGate<E: Erc20Reads> {
    reader: Arc<E>,
}

impl<E: Erc20Reads> AllowanceGate<E> {
    pub fn new(reader: Arc<E>) -> Self {
        Self { reader }
    }

    /// Reads the current allowance against the required raw spend.
    ///
    /// The native asset needs no allowance and always passes.
    pub async fn check(
        &self,
        token: &Token,
        owner: Address,
        spender: Address,
        required: U256,
    ) -> Result<AllowanceState, TradeError> {
        if token.is_native() {
            return Ok(AllowanceState::unlimited(required));
        }
        let allowance = self.reader.allowance(token.address, owner, spender).await?;
        Ok(AllowanceState::new(allowance, required))
    }

    /// Fail-closed sufficiency: a read failure reports insufficient.
    pub async fn check_sufficient(
        &self,
        token: &Token,
        owner: Address,
        spender: Address,
        required: U256,
    ) -> bool {
        match self.check(token, owner, spender, required).await {
            Ok(state) => state.is_sufficient(),
            Err(error) => {
                warn!(token = %token.address, error = %error, "allowance read failed, treating as insufficient");
                false
            }
        }
    }

    /// The shortfall to request in an approval. When the allowance cannot be
    /// read, the full required amount is reported.
    pub async fn missing_amount(
        &self,
        token: &Token,
        owner: Address,
        spender: Address,
        required: &Amount,
    ) -> Amount {
        match self.check(token, owner, spender, required.raw).await {
            Ok(state) => state.missing_amount(token.decimals),
            Err(_) => *required,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockChain;

    fn token() -> Token {
        Token::new(Address::repeat_byte(0x01), "First Digital USD", "FDUSD", 18)
    }

    #[tokio::test]
    async fn test_sufficient_and_shortfall() {
        let chain = Arc::new(MockChain::new());
        chain.set_allowance(U256::from(40u64));
        let gate = AllowanceGate::new(chain.clone());
        let owner = Address::repeat_byte(0x42);
        let spender = Address::repeat_byte(0xaa);

        let state = gate
            .check(&token(), owner, spender, U256::from(100u64))
            .await
            .unwrap();
        assert!(!state.is_sufficient());
        assert_eq!(state.missing(), U256::from(60u64));
        assert_eq!(state.allowance + state.missing(), state.required);

        chain.set_allowance(U256::from(100u64));
        assert!(gate.check_sufficient(&token(), owner, spender, U256::from(100u64)).await);
        assert!(gate.check_sufficient(&token(), owner, spender, U256::from(50u64)).await);
    }

    #[tokio::test]
    async fn test_read_failure_is_insufficient() {
        let chain = Arc::new(MockChain::new());
        chain.fail_erc20_reads();
        let gate = AllowanceGate::new(chain.clone());
        let owner = Address::repeat_byte(0x42);
        let spender = Address::repeat_byte(0xaa);

        assert!(!gate.check_sufficient(&token(), owner, spender, U256::from(1u64)).await);

        let required = Amount::parse("100", 18).unwrap();
        let missing = gate.missing_amount(&token(), owner, spender, &required).await;
        assert_eq!(missing, required);
    }

    #[tokio::test]
    async fn test_native_asset_needs_no_allowance() {
        let chain = Arc::new(MockChain::new());
        chain.set_allowance(U256::ZERO);
        let gate = AllowanceGate::new(chain.clone());
        let native = Token::new(Address::ZERO, "Binance Coin", "BNB", 18);

        assert!(
            gate.check_sufficient(
                &native,
                Address::repeat_byte(0x42),
                Address::repeat_byte(0xaa),
                U256::from(1_000_000u64)
            )
            .await
        );
    }
}
