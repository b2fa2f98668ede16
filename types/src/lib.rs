//! Core types shared across the floodgate workspace.
//!
//! These mirror the JSON shapes exposed by a CometBFT node's RPC and REST
//! (LCD) endpoints, plus the hand-written protobuf messages needed to build
//! a signed swap operation.

mod account;
mod error;
mod hash;
mod pool;
pub mod proto;
pub(crate) mod serializers;
mod status;
mod tx;

pub use crate::account::{AccountResponse, BaseAccount};
pub use crate::error::{Error, Result};
pub use crate::hash::Hash;
pub use crate::pool::{LiquidityCoin, PoolLiquidity};
pub use crate::status::{NodeInfo, NodeStatus, SyncInfo};
pub use crate::tx::{BroadcastTxResponse, TxResponse, TxResult};
