//! Domain model for synthetic-asset pool trading.
//!
//! This crate contains the pure, I/O-free core of the system:
//! - Tokens, pools and the static pool registry
//! - Fixed-point amount handling (raw smallest-unit integers)
//! - Slippage tolerance and trade intents
//! - The trade error taxonomy

/// Prelude module for convenient imports.
pub mod prelude;

/// Core entities (tokens, pools).
pub mod entities;
/// Trade direction classification.
pub mod enums;
/// Error taxonomy.
pub mod error;
/// Trade intent construction.
pub mod intent;
/// Built-in token catalog and pool configuration.
pub mod presets;
/// Static pool registry.
pub mod registry;
/// Value objects (amounts, slippage, quotes, allowance state).
pub mod value_objects;
