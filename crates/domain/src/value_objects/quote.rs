use super::Amount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A trade quote: expected output, fee, and the implied exchange rate.
///
/// Ephemeral: recomputed on every input change and immediately superseded by
/// the next request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Expected output, scaled by the output token's decimals.
    pub output: Amount,
    /// Fee charged by the pool. Denominated in the input token for mints and
    /// in the collateral (output) token for redeems, as reported on-chain.
    pub fee: Amount,
    /// `output / input`, `None` when the input is zero.
    pub exchange_rate: Option<Decimal>,
}

impl Quote {
    /// Builds a quote from the on-chain view-call results, computing the
    /// exchange rate only for a non-zero input.
    #[must_use]
    pub fn from_trade_info(input: &Amount, output: Amount, fee: Amount) -> Self {
        let exchange_rate = if input.is_zero() {
            None
        } else {
            match (output.to_decimal(), input.to_decimal()) {
                (Some(out), Some(inp)) if !inp.is_zero() => {
                    out.checked_div(inp).map(|rate| rate.round_dp(6))
                }
                _ => None,
            }
        };
        Self {
            output,
            fee,
            exchange_rate,
        }
    }

}
