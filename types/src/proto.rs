//! Hand-written protobuf messages for the Cosmos transaction envelope and
//! the poolmanager swap instruction.
//!
//! Only the fields floodgate actually populates are modelled; tag numbers
//! follow the upstream `.proto` definitions so the encoded bytes are
//! indistinguishable from generated code.

use prost::Message;
use prost_types::Any;

/// `SIGN_MODE_DIRECT`, the only signing mode floodgate uses.
pub const SIGN_MODE_DIRECT: i32 = 1;

/// A coin of a given denomination.
///
/// `cosmos.base.v1beta1.Coin`
#[derive(Clone, PartialEq, Message)]
pub struct Coin {
    #[prost(string, tag = "1")]
    pub denom: String,
    #[prost(string, tag = "2")]
    pub amount: String,
}

/// Body of a transaction.
///
/// `cosmos.tx.v1beta1.TxBody`
#[derive(Clone, PartialEq, Message)]
pub struct TxBody {
    #[prost(message, repeated, tag = "1")]
    pub messages: Vec<Any>,
    #[prost(string, tag = "2")]
    pub memo: String,
    #[prost(uint64, tag = "3")]
    pub timeout_height: u64,
}

/// Fee and gas limit of a transaction.
///
/// `cosmos.tx.v1beta1.Fee`
#[derive(Clone, PartialEq, Message)]
pub struct Fee {
    #[prost(message, repeated, tag = "1")]
    pub amount: Vec<Coin>,
    #[prost(uint64, tag = "2")]
    pub gas_limit: u64,
    #[prost(string, tag = "3")]
    pub payer: String,
    #[prost(string, tag = "4")]
    pub granter: String,
}

/// Signing metadata of a single signer.
///
/// `cosmos.tx.v1beta1.SignerInfo`
#[derive(Clone, PartialEq, Message)]
pub struct SignerInfo {
    #[prost(message, optional, tag = "1")]
    pub public_key: Option<Any>,
    #[prost(message, optional, tag = "2")]
    pub mode_info: Option<ModeInfo>,
    #[prost(uint64, tag = "3")]
    pub sequence: u64,
}

/// Signing mode of a signer.
///
/// `cosmos.tx.v1beta1.ModeInfo`
#[derive(Clone, PartialEq, Message)]
pub struct ModeInfo {
    #[prost(oneof = "mode_info::Sum", tags = "1")]
    pub sum: Option<mode_info::Sum>,
}

impl ModeInfo {
    /// Mode info for a single direct signer.
    pub fn single(mode: i32) -> ModeInfo {
        ModeInfo {
            sum: Some(mode_info::Sum::Single(Single { mode })),
        }
    }
}

pub mod mode_info {
    /// `cosmos.tx.v1beta1.ModeInfo.sum`
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum Sum {
        #[prost(message, tag = "1")]
        Single(super::Single),
    }
}

/// `cosmos.tx.v1beta1.ModeInfo.Single`
#[derive(Clone, PartialEq, Message)]
pub struct Single {
    #[prost(int32, tag = "1")]
    pub mode: i32,
}

/// Authorization metadata of a transaction.
///
/// `cosmos.tx.v1beta1.AuthInfo`
#[derive(Clone, PartialEq, Message)]
pub struct AuthInfo {
    #[prost(message, repeated, tag = "1")]
    pub signer_infos: Vec<SignerInfo>,
    #[prost(message, optional, tag = "2")]
    pub fee: Option<Fee>,
}

/// The document that gets signed under `SIGN_MODE_DIRECT`.
///
/// `cosmos.tx.v1beta1.SignDoc`
#[derive(Clone, PartialEq, Message)]
pub struct SignDoc {
    #[prost(bytes = "vec", tag = "1")]
    pub body_bytes: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub auth_info_bytes: Vec<u8>,
    #[prost(string, tag = "3")]
    pub chain_id: String,
    #[prost(uint64, tag = "4")]
    pub account_number: u64,
}

/// Broadcastable form of a signed transaction.
///
/// `cosmos.tx.v1beta1.TxRaw`
#[derive(Clone, PartialEq, Message)]
pub struct TxRaw {
    #[prost(bytes = "vec", tag = "1")]
    pub body_bytes: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub auth_info_bytes: Vec<u8>,
    #[prost(bytes = "vec", repeated, tag = "3")]
    pub signatures: Vec<Vec<u8>>,
}

pub mod secp256k1 {
    use prost::Message;

    /// `cosmos.crypto.secp256k1.PubKey`
    #[derive(Clone, PartialEq, Message)]
    pub struct PubKey {
        /// Compressed (33 byte) public key.
        #[prost(bytes = "vec", tag = "1")]
        pub key: Vec<u8>,
    }

    impl PubKey {
        pub const TYPE_URL: &'static str = "/cosmos.crypto.secp256k1.PubKey";

        /// Pack the key into a protobuf `Any`.
        pub fn into_any(self) -> prost_types::Any {
            prost_types::Any {
                type_url: Self::TYPE_URL.to_owned(),
                value: self.encode_to_vec(),
            }
        }
    }
}

/// A single-hop swap with an exact input amount.
///
/// `osmosis.poolmanager.v1beta1.MsgSwapExactAmountIn`
#[derive(Clone, PartialEq, Message)]
pub struct MsgSwapExactAmountIn {
    #[prost(string, tag = "1")]
    pub sender: String,
    #[prost(message, repeated, tag = "2")]
    pub routes: Vec<SwapAmountInRoute>,
    #[prost(message, optional, tag = "3")]
    pub token_in: Option<Coin>,
    #[prost(string, tag = "4")]
    pub token_out_min_amount: String,
}

impl MsgSwapExactAmountIn {
    pub const TYPE_URL: &'static str = "/osmosis.poolmanager.v1beta1.MsgSwapExactAmountIn";

    /// Pack the message into a protobuf `Any`.
    pub fn into_any(self) -> Any {
        Any {
            type_url: Self::TYPE_URL.to_owned(),
            value: self.encode_to_vec(),
        }
    }
}

/// A single hop of a swap route.
///
/// `osmosis.poolmanager.v1beta1.SwapAmountInRoute`
#[derive(Clone, PartialEq, Message)]
pub struct SwapAmountInRoute {
    #[prost(uint64, tag = "1")]
    pub pool_id: u64,
    #[prost(string, tag = "2")]
    pub token_out_denom: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_msg_roundtrips_through_any() {
        let msg = MsgSwapExactAmountIn {
            sender: "osmo1qy352eufqy352eufqy352eufqy35qqqz4xfcky".to_owned(),
            routes: vec![SwapAmountInRoute {
                pool_id: 712,
                token_out_denom: "uion".to_owned(),
            }],
            token_in: Some(Coin {
                denom: "uosmo".to_owned(),
                amount: "100000".to_owned(),
            }),
            token_out_min_amount: "1".to_owned(),
        };

        let any = msg.clone().into_any();
        assert_eq!(any.type_url, MsgSwapExactAmountIn::TYPE_URL);
        let decoded = MsgSwapExactAmountIn::decode(any.value.as_slice()).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn sign_doc_encoding_is_deterministic() {
        let doc = SignDoc {
            body_bytes: vec![1, 2, 3],
            auth_info_bytes: vec![4, 5],
            chain_id: "osmosis-1".to_owned(),
            account_number: 584406,
        };
        assert_eq!(doc.encode_to_vec(), doc.clone().encode_to_vec());
        assert!(!doc.encode_to_vec().is_empty());
    }

    #[test]
    fn tx_raw_carries_signature() {
        let raw = TxRaw {
            body_bytes: vec![1],
            auth_info_bytes: vec![2],
            signatures: vec![vec![0u8; 64]],
        };
        let decoded = TxRaw::decode(raw.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded.signatures.len(), 1);
        assert_eq!(decoded.signatures[0].len(), 64);
    }
}
