/// Allowance sufficiency state.
pub mod allowance;
/// Fixed-point token amounts.
pub mod amount;
/// Trade quotes.
pub mod quote;
/// Slippage tolerance.
pub mod slippage;

pub use allowance::AllowanceState;
pub use amount::Amount;
pub use quote::Quote;
pub use slippage::SlippageTolerance;
