use serde::{Deserialize, Serialize};

/// Wrapper around the LCD `accounts/{address}` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountResponse {
    /// The queried account.
    pub account: BaseAccount,
}

/// An account's state as reported by the auth module.
///
/// `account_number` is assigned by the chain and never changes; `sequence`
/// is the per-account request counter the node uses to order and deduplicate
/// operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseAccount {
    /// Bech32 address of the account.
    #[serde(default)]
    pub address: String,
    /// Immutable chain-assigned identifier.
    #[serde(with = "crate::serializers::str_u64")]
    pub account_number: u64,
    /// Current expected request counter.
    #[serde(with = "crate::serializers::str_u64")]
    pub sequence: u64,
}
