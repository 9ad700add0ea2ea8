//! Convenient re-exports of the engine types.

pub use crate::allowance::AllowanceGate;
pub use crate::config::EngineConfig;
pub use crate::faucet::{FaucetService, STANDARD_CLAIM};
pub use crate::history::{TradeHistory, TradeRecord};
pub use crate::orchestrator::{TradeOrchestrator, TradePhase, TradeState};
pub use crate::quote::{QuoteService, QuoteStatus};
pub use crate::vault::{VaultManager, VaultOverview};
