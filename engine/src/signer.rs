//! Key derivation and transaction signing.

use bech32::{Bech32, Hrp};
use bip32::XPrv;
use bip39::{Language, Mnemonic};
use k256::ecdsa::signature::Signer;
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use prost::Message;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

use floodgate_types::proto::{
    secp256k1, AuthInfo, Coin, Fee, ModeInfo, SignDoc, SignerInfo, TxBody, TxRaw, SIGN_MODE_DIRECT,
};

use crate::{Error, Result};

/// A secp256k1 keypair derived from a mnemonic, plus its bech32 address.
pub struct Wallet {
    signing_key: SigningKey,
    verifying_key: VerifyingKey,
    address: String,
}

impl Wallet {
    /// Derive the keypair at `m/44'/{coin_type}'/0'/0/0` from a BIP-39
    /// mnemonic of any valid length and encode the address under the given
    /// bech32 prefix.
    pub fn from_mnemonic(phrase: &str, coin_type: u32, bech32_prefix: &str) -> Result<Wallet> {
        let mnemonic = Mnemonic::parse_in_normalized(Language::English, phrase.trim())
            .map_err(|_| Error::InvalidSigningKey)?;
        let seed = mnemonic.to_seed("");

        let path = format!("m/44'/{coin_type}'/0'/0/0")
            .parse()
            .map_err(|_| Error::InvalidSigningKey)?;
        let xprv = XPrv::derive_from_path(&seed, &path).map_err(|_| Error::InvalidSigningKey)?;
        let signing_key = xprv.private_key().clone();
        let verifying_key = *signing_key.verifying_key();

        let address = bech32_address(&verifying_key, bech32_prefix)?;

        Ok(Wallet {
            signing_key,
            verifying_key,
            address,
        })
    }

    /// The account's bech32 address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The compressed (33 byte) public key.
    pub fn public_key_bytes(&self) -> Vec<u8> {
        self.verifying_key.to_encoded_point(true).as_bytes().to_vec()
    }

    /// Sign `body` and the transaction metadata under `SIGN_MODE_DIRECT`,
    /// producing a broadcastable transaction.
    pub fn sign_tx(
        &self,
        body: TxBody,
        chain_id: &str,
        account_number: u64,
        sequence: u64,
        gas_limit: u64,
        fee_amount: Coin,
    ) -> Result<TxRaw> {
        let public_key = secp256k1::PubKey {
            key: self.public_key_bytes(),
        };

        let auth_info = AuthInfo {
            signer_infos: vec![SignerInfo {
                public_key: Some(public_key.into_any()),
                mode_info: Some(ModeInfo::single(SIGN_MODE_DIRECT)),
                sequence,
            }],
            fee: Some(Fee {
                amount: vec![fee_amount],
                gas_limit,
                payer: String::new(),
                granter: String::new(),
            }),
        };

        let doc = SignDoc {
            body_bytes: body.encode_to_vec(),
            auth_info_bytes: auth_info.encode_to_vec(),
            chain_id: chain_id.to_owned(),
            account_number,
        };
        let signature: Signature = self.signing_key.try_sign(&doc.encode_to_vec())?;

        Ok(TxRaw {
            body_bytes: doc.body_bytes,
            auth_info_bytes: doc.auth_info_bytes,
            signatures: vec![signature.to_bytes().to_vec()],
        })
    }
}

/// Standard Cosmos address. Ripemd160 over sha256 of the compressed public
/// key, bech32 encoded.
fn bech32_address(verifying_key: &VerifyingKey, prefix: &str) -> Result<String> {
    let hrp = Hrp::parse(prefix).map_err(|_| Error::InvalidAddressPrefix(prefix.to_owned()))?;
    let sha = Sha256::digest(verifying_key.to_encoded_point(true).as_bytes());
    let hash = Ripemd160::digest(sha);
    bech32::encode::<Bech32>(hrp, &hash).map_err(|_| Error::InvalidAddressPrefix(prefix.to_owned()))
}
