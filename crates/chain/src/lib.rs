//! On-chain access layer for the synthetic-asset pools.
//!
//! This crate owns everything that touches the wire:
//! - `sol!` bindings for the pool and ERC20 ABIs
//! - A thin JSON-RPC provider over HTTP
//! - Trait seams the engine consumes (`PoolReads`, `Erc20Reads`,
//!   `EventScan`, `WalletProvider`)
//! - Calldata construction for approve/mint/redeem submissions
//!
//! The wallet stays abstract: signing and broadcasting belong to the
//! embedding application (a browser wallet, a keystore, a test double).

/// ABI bindings.
pub mod abi;
/// Prelude module for convenient imports.
pub mod prelude;
/// Contract reads over the RPC provider.
pub mod reader;
/// JSON-RPC provider.
pub mod rpc;
/// Calldata construction and submission through a wallet.
pub mod submitter;
/// Trait seams consumed by the engine.
pub mod traits;
