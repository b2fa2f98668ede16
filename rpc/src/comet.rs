use floodgate_types::{BroadcastTxResponse, NodeStatus, TxResponse};
use jsonrpsee::proc_macros::rpc;

#[rpc(client)]
pub trait Comet {
    /// Status returns node info and the latest block height.
    #[method(name = "status", param_kind = map)]
    async fn status(&self) -> Result<NodeStatus, Error>;

    /// BroadcastTxSync submits a signed operation and returns the mempool
    /// CheckTx response. `tx` is the base64 encoding of the raw bytes.
    #[method(name = "broadcast_tx_sync", param_kind = map)]
    async fn broadcast_tx_sync(&self, tx: String) -> Result<BroadcastTxResponse, Error>;

    /// Tx queries the execution result of a committed operation. `hash` is
    /// the base64 encoding of the content hash.
    #[method(name = "tx", param_kind = map)]
    async fn tx(&self, hash: String, prove: bool) -> Result<TxResponse, Error>;
}
