use serde::{Deserialize, Serialize};

use crate::hash::Hash;

/// Result of a `broadcast_tx_sync` RPC call.
///
/// `code == 0` means the node admitted the operation to its mempool. That is
/// acceptance for inclusion consideration, not a guarantee of successful
/// execution; the eventual outcome has to be re-queried via [`TxResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastTxResponse {
    /// CheckTx response code.
    pub code: u32,
    /// Arbitrary response data.
    #[serde(default)]
    pub data: String,
    /// Free-text log for the submission attempt.
    ///
    /// On a sequence mismatch this is the node's only channel for revealing
    /// the counter value it expects.
    #[serde(default)]
    pub log: String,
    /// Namespace of the response code.
    #[serde(default)]
    pub codespace: String,
    /// Content hash assigned to the operation.
    pub hash: Hash,
}

impl BroadcastTxResponse {
    /// Whether the operation was accepted for mempool inclusion.
    pub fn is_accepted(&self) -> bool {
        self.code == 0
    }
}

/// Result of a `tx` RPC query for a committed operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxResponse {
    /// Content hash of the operation.
    pub hash: Hash,
    /// Height at which the operation was included.
    #[serde(with = "crate::serializers::str_u64")]
    pub height: u64,
    /// Execution result.
    pub tx_result: TxResult,
}

/// Execution result of a committed operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxResult {
    /// DeliverTx response code; non-zero means execution failed.
    pub code: u32,
    /// Free-text execution log.
    #[serde(default)]
    pub log: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_broadcast_response() {
        let json = r#"{
            "code": 0,
            "data": "",
            "log": "",
            "codespace": "",
            "hash": "75CA0D5C5F54372F4B2A9E93C5D1D6A3A0D55C99D2E136E00ABFD90AB563E3E6"
        }"#;

        let resp: BroadcastTxResponse = serde_json::from_str(json).unwrap();
        assert!(resp.is_accepted());
        assert_eq!(resp.hash.to_string().len(), 64);
    }

    #[test]
    fn deserialize_rejected_broadcast_response() {
        let json = r#"{
            "code": 32,
            "log": "account sequence mismatch, expected 43, got 42: incorrect account sequence",
            "hash": "75CA0D5C5F54372F4B2A9E93C5D1D6A3A0D55C99D2E136E00ABFD90AB563E3E6"
        }"#;

        let resp: BroadcastTxResponse = serde_json::from_str(json).unwrap();
        assert!(!resp.is_accepted());
        assert!(resp.log.contains("account sequence mismatch"));
    }

    #[test]
    fn deserialize_tx_response() {
        let json = r#"{
            "hash": "75CA0D5C5F54372F4B2A9E93C5D1D6A3A0D55C99D2E136E00ABFD90AB563E3E6",
            "height": "1695021",
            "index": 3,
            "tx_result": {
                "code": 5,
                "log": "insufficient funds",
                "gas_used": "81000"
            },
            "tx": "CpUBCg=="
        }"#;

        let resp: TxResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.height, 1695021);
        assert_eq!(resp.tx_result.code, 5);
    }
}
