//! Trade orchestration engine.
//!
//! Aggregates on-chain state into a consistent view and drives the
//! approve-then-trade flow:
//! - Quote fetching with last-request-wins staleness discarding
//! - Fail-closed allowance gating with explicit refresh
//! - The trade state machine (quote, approve, submit, confirm)
//! - Historical mint/redeem activity scanning
//! - LP vault deposits/withdrawals and the test-collateral faucet

/// Prelude module for convenient imports.
pub mod prelude;

/// Allowance gating.
pub mod allowance;
/// Engine policy configuration.
pub mod config;
/// Test-collateral faucet.
pub mod faucet;
/// Historical trade activity.
pub mod history;
/// Trade state machine.
pub mod orchestrator;
/// Quote service.
pub mod quote;
/// LP vault management.
pub mod vault;

#[cfg(test)]
pub(crate) mod mock;
