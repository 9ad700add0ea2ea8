/// Liquidity pool entity.
pub mod pool;
/// Token entity.
pub mod token;
/// LP vault entity.
pub mod vault;

pub use pool::Pool;
pub use token::Token;
pub use vault::Vault;
