use serde::{Deserialize, Serialize};

/// Result of the node's `status` RPC call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStatus {
    /// Static information about the node.
    pub node_info: NodeInfo,
    /// Sync state of the node.
    pub sync_info: SyncInfo,
}

/// Static information about the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    /// Chain identifier the node follows.
    pub network: String,
}

/// Sync state of the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncInfo {
    /// Latest block height known to the node.
    #[serde(with = "crate::serializers::str_u64")]
    pub latest_block_height: u64,
}
