//! Post-run verification of accepted operations.

use floodgate_types::Hash;
use tracing::warn;

use crate::node::NodeClient;

/// Query the execution result of every accepted operation, returning the hashes
/// that ultimately failed.
///
/// Query errors are logged and skipped; an unreachable operation is not
/// evidence of failure.
pub async fn verify_accepted(node: &dyn NodeClient, accepted: &[Hash]) -> Vec<Hash> {
    let mut failed = Vec::new();
    for hash in accepted {
        match node.tx_result(*hash).await {
            Ok(0) => {}
            Ok(code) => {
                warn!(%hash, code, "accepted operation failed during execution");
                failed.push(*hash);
            }
            Err(error) => {
                warn!(%hash, %error, "failed to query operation result, skipping");
            }
        }
    }
    failed
}
