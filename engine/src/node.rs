//! Node access and the per-endpoint registry.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use base64::prelude::*;
use floodgate_rpc::{Client, CometClient, LcdClient};
use floodgate_types::{BaseAccount, BroadcastTxResponse, Hash};

use crate::sequence::SequenceTracker;
use crate::Result;

/// Everything the engine needs from a node.
///
/// One seam covers both the consensus RPC and the REST API so that tests can
/// script a whole node with a single fake.
#[async_trait]
pub trait NodeClient: Send + Sync {
    /// Height of the latest committed block.
    async fn latest_height(&self) -> Result<u64>;

    /// Network identifier reported by the node.
    async fn chain_id(&self) -> Result<String>;

    /// The chain's current view of an account.
    async fn account_state(&self, address: &str) -> Result<BaseAccount>;

    /// Submit a signed operation, returning the node's admission response.
    async fn broadcast(&self, tx_bytes: Vec<u8>) -> Result<BroadcastTxResponse>;

    /// Execution result code of a committed operation.
    async fn tx_result(&self, hash: Hash) -> Result<u32>;
}

/// [`NodeClient`] backed by a live consensus RPC plus the REST API.
pub struct HttpNode {
    comet: Client,
    lcd: LcdClient,
}

impl HttpNode {
    pub fn new(comet: Client, lcd: LcdClient) -> Self {
        HttpNode { comet, lcd }
    }
}

#[async_trait]
impl NodeClient for HttpNode {
    async fn latest_height(&self) -> Result<u64> {
        let status = self
            .comet
            .status()
            .await
            .map_err(floodgate_rpc::Error::from)?;
        Ok(status.sync_info.latest_block_height)
    }

    async fn chain_id(&self) -> Result<String> {
        let status = self
            .comet
            .status()
            .await
            .map_err(floodgate_rpc::Error::from)?;
        Ok(status.node_info.network)
    }

    async fn account_state(&self, address: &str) -> Result<BaseAccount> {
        Ok(self.lcd.account(address).await?)
    }

    async fn broadcast(&self, tx_bytes: Vec<u8>) -> Result<BroadcastTxResponse> {
        let encoded = BASE64_STANDARD.encode(tx_bytes);
        let resp = self
            .comet
            .broadcast_tx_sync(encoded)
            .await
            .map_err(floodgate_rpc::Error::from)?;
        Ok(resp)
    }

    async fn tx_result(&self, hash: Hash) -> Result<u32> {
        let encoded = BASE64_STANDARD.encode(hash.0);
        let resp = self
            .comet
            .tx(encoded, false)
            .await
            .map_err(floodgate_rpc::Error::from)?;
        Ok(resp.tx_result.code)
    }
}

/// One node plus the account state tracked against it.
pub struct Endpoint {
    /// Registry-assigned identifier.
    pub id: usize,
    /// Bech32 address of the signing account, queried on this node during
    /// per-round resync.
    pub address: String,
    /// Access to the node.
    pub client: Arc<dyn NodeClient>,
    /// Sequence state for the signing account as this node sees it.
    pub tracker: SequenceTracker,
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("id", &self.id)
            .field("address", &self.address)
            .field("tracker", &self.tracker)
            .finish_non_exhaustive()
    }
}

/// Keeps each node's sequence state separate from every other node's.
///
/// Trackers are per-endpoint because each node holds its own mempool view
/// of the account; a correction learned from one node must never leak into
/// another's state.
#[derive(Default)]
pub struct EndpointRegistry {
    endpoints: Vec<Endpoint>,
}

impl EndpointRegistry {
    pub fn new() -> Self {
        EndpointRegistry::default()
    }

    /// Register a node together with the account address to track on it,
    /// returning the endpoint identifier. The first registered endpoint is
    /// the primary.
    pub fn insert(&mut self, address: String, client: Arc<dyn NodeClient>) -> usize {
        let id = self.endpoints.len();
        self.endpoints.push(Endpoint {
            id,
            address,
            client,
            tracker: SequenceTracker::new(0, 0),
        });
        id
    }

    pub fn get_mut(&mut self, id: usize) -> Option<&mut Endpoint> {
        self.endpoints.get_mut(id)
    }

    /// Consume the registry, yielding the primary endpoint.
    pub fn into_primary(self) -> Option<Endpoint> {
        self.endpoints.into_iter().next()
    }
}
