//! Clients for the node endpoints floodgate consumes: the CometBFT JSON-RPC
//! (status, submission, result queries) and the REST (LCD) API (account
//! state, pool liquidity).

pub mod client;
mod comet;
mod error;
mod lcd;

pub use crate::client::Client;
pub use crate::comet::CometClient;
pub use crate::error::{Error, Result};
pub use crate::lcd::LcdClient;
