//! Convenient re-exports of the domain types.

pub use crate::entities::{Pool, Token, Vault};
pub use crate::enums::TradeDirection;
pub use crate::error::{ConfigError, TradeError};
pub use crate::intent::TradeIntent;
pub use crate::presets::TokenCatalog;
pub use crate::registry::PoolRegistry;
pub use crate::value_objects::{AllowanceState, Amount, Quote, SlippageTolerance};
