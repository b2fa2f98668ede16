use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use floodgate_types::{BaseAccount, BroadcastTxResponse, Hash};
use tokio::sync::Mutex;

use crate::node::NodeClient;
use crate::swap::OperationBuilder;
use crate::{Error, Result};

/// Scripted [`NodeClient`] for driving the engine without a node.
///
/// Responses are popped from per-method queues; when a queue runs dry a
/// sensible default takes over (heights keep climbing, broadcasts are
/// accepted). Broadcast payloads are recorded for assertions.
pub(crate) struct FakeNode {
    height: AtomicU64,
    heights: Mutex<Vec<u64>>,
    accounts: Mutex<Vec<Result<BaseAccount>>>,
    broadcasts: Mutex<Vec<Result<BroadcastTxResponse>>>,
    tx_results: Mutex<HashMap<Hash, Result<u32>>>,
    pub(crate) broadcast_calls: Mutex<Vec<Vec<u8>>>,
}

impl FakeNode {
    pub(crate) fn new() -> Self {
        FakeNode {
            height: AtomicU64::new(0),
            heights: Mutex::new(Vec::new()),
            accounts: Mutex::new(Vec::new()),
            broadcasts: Mutex::new(Vec::new()),
            tx_results: Mutex::new(HashMap::new()),
            broadcast_calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) async fn script_heights(&self, heights: impl IntoIterator<Item = u64>) {
        let mut queue = self.heights.lock().await;
        // Popped from the back, so store reversed.
        let mut items: Vec<_> = heights.into_iter().collect();
        items.reverse();
        *queue = items;
    }

    pub(crate) async fn script_account(&self, sequence: u64, account_number: u64) {
        self.accounts.lock().await.insert(
            0,
            Ok(BaseAccount {
                address: String::new(),
                account_number,
                sequence,
            }),
        );
    }

    pub(crate) async fn script_broadcast(&self, code: u32, log: &str, hash: Hash) {
        self.broadcasts.lock().await.insert(
            0,
            Ok(BroadcastTxResponse {
                code,
                data: String::new(),
                log: log.to_owned(),
                codespace: String::new(),
                hash,
            }),
        );
    }

    pub(crate) async fn script_broadcast_error(&self) {
        self.broadcasts
            .lock()
            .await
            .insert(0, Err(Error::InvalidSigningKey));
    }

    pub(crate) async fn script_tx_result(&self, hash: Hash, result: Result<u32>) {
        self.tx_results.lock().await.insert(hash, result);
    }
}

#[async_trait]
impl NodeClient for FakeNode {
    async fn latest_height(&self) -> Result<u64> {
        if let Some(height) = self.heights.lock().await.pop() {
            return Ok(height);
        }
        Ok(self.height.fetch_add(1, Ordering::Relaxed) + 1)
    }

    async fn chain_id(&self) -> Result<String> {
        Ok("fakenet-1".to_owned())
    }

    async fn account_state(&self, _address: &str) -> Result<BaseAccount> {
        if let Some(account) = self.accounts.lock().await.pop() {
            return account;
        }
        Ok(BaseAccount {
            address: String::new(),
            account_number: 1,
            sequence: 0,
        })
    }

    async fn broadcast(&self, tx_bytes: Vec<u8>) -> Result<BroadcastTxResponse> {
        self.broadcast_calls.lock().await.push(tx_bytes);
        if let Some(resp) = self.broadcasts.lock().await.pop() {
            return resp;
        }
        Ok(BroadcastTxResponse {
            code: 0,
            data: String::new(),
            log: String::new(),
            codespace: String::new(),
            hash: Hash([0; 32]),
        })
    }

    async fn tx_result(&self, hash: Hash) -> Result<u32> {
        if let Some(result) = self.tx_results.lock().await.remove(&hash) {
            return result;
        }
        Ok(0)
    }
}

/// [`OperationBuilder`] that emits a marker payload and records its inputs.
/// Clones share the call log.
#[derive(Clone, Default)]
pub(crate) struct FakeBuilder {
    pub(crate) calls: Arc<Mutex<Vec<(u64, u64)>>>,
}

#[async_trait]
impl OperationBuilder for FakeBuilder {
    async fn build(&self, sequence: u64, _account_number: u64, payload_id: u64) -> Result<Vec<u8>> {
        self.calls.lock().await.push((sequence, payload_id));
        Ok(vec![sequence as u8, payload_id as u8])
    }
}
