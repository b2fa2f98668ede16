use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::{Error, Result};

/// Content hash the node assigns to an accepted operation.
///
/// Usable to query the operation's eventual execution result. Rendered as
/// uppercase hex, the way CometBFT reports it in `broadcast_tx_sync`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hash(pub [u8; 32]);

impl Hash {
    /// Sha256 digest of the given bytes.
    pub fn sha256(bytes: &[u8]) -> Hash {
        Hash(Sha256::digest(bytes).into())
    }

    /// Raw bytes of the hash.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_upper(self.0))
    }
}

impl FromStr for Hash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Hash> {
        let hex_str = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(hex_str).map_err(|_| Error::InvalidHash(s.to_owned()))?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| Error::InvalidHash(s.to_owned()))?;
        Ok(Hash(bytes))
    }
}

impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Hash, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display_roundtrip() {
        let hash = Hash::sha256(b"floodgate");
        let displayed = hash.to_string();
        assert_eq!(displayed.len(), 64);
        assert_eq!(displayed, displayed.to_uppercase());
        assert_eq!(displayed.parse::<Hash>().unwrap(), hash);
    }

    #[test]
    fn parse_accepts_0x_prefix_and_lowercase() {
        let hash = Hash::sha256(b"abc");
        let prefixed = format!("0x{}", hash.to_string().to_lowercase());
        assert_eq!(prefixed.parse::<Hash>().unwrap(), hash);
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert!("ABCD".parse::<Hash>().is_err());
        assert!("zz".repeat(32).parse::<Hash>().is_err());
    }

    #[test]
    fn serde_as_hex_string() {
        let hash = Hash::sha256(b"abc");
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{hash}\""));
        assert_eq!(serde_json::from_str::<Hash>(&json).unwrap(), hash);
    }
}
