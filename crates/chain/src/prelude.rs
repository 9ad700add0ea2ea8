//! Convenient re-exports of the chain access layer.

pub use crate::reader::PoolReader;
pub use crate::rpc::RpcProvider;
pub use crate::submitter::{
    TradeSubmitter, approve_calldata, claim_calldata, deposit_calldata, trade_calldata,
    withdraw_calldata,
};
pub use crate::traits::{
    CollateralBreakdown, Erc20Reads, EventScan, FaucetAllotment, FaucetReads, LpPosition,
    PoolEvent, PoolEventKind, PoolReads, TxHash, TxReceipt, VaultReads, WalletProvider,
};
