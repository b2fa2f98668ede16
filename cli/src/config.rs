use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

/// Runtime configuration, read from a JSON file with per-field defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    /// Classic liquidity pools.
    pub gamm_pool_ids: Vec<u64>,
    /// Concentrated liquidity pools.
    pub concentrated_pool_ids: Vec<u64>,
    /// CosmWasm pools.
    pub cosmwasm_pool_ids: Vec<u64>,
    /// BIP-39 mnemonic of the submitting account. No default; runs refuse
    /// to start without one.
    pub mnemonic: String,
    pub rpc_url: String,
    pub lcd_url: String,
    /// Path of the pool-info endpoint, relative to the LCD base url.
    pub pool_info_path: Option<String>,
    pub gas_per_byte: u64,
    pub base_gas: u64,
    pub denom: String,
    pub gas_low: u64,
    pub precision: u32,
    pub swap_amount: u64,
    pub coin_type: u32,
    pub bech32_prefix: String,
    pub resync_each_round: bool,
    pub mismatch_retry_limit: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            gamm_pool_ids: vec![
                1, 712, 704, 812, 678, 681, 796, 1057, 3, 9, 725, 832, 806, 840, 1241, 1687, 1632,
                722, 584, 560, 586, 5, 604, 497, 992, 799, 1244, 744, 1075, 1225, 2, 1020, 789,
                816, 674, 608, 1036, 1226, 899, 907, 605, 1738, 1827, 571, 626, 1320, 1046, 602,
                481, 42, 15, 800, 777, 7, 924, 648, 1173, 900, 597, 1408, 627, 1249, 773, 601,
                625, 651, 573, 641, 577, 644,
            ],
            concentrated_pool_ids: vec![
                1252, 1135, 1093, 1134, 1090, 1133, 1248, 1323, 1094, 1095, 1263, 1590, 1096,
                1265, 1098, 1097, 1092, 1464, 1400, 1388, 1104, 1325, 1281, 1114, 1066, 1215,
                1449, 1077, 1399, 1770, 1110, 1750, 1111, 1361, 1670, 1221, 1623, 1101, 1088,
                1245, 1105, 1779, 1434, 1477, 1483, 1620, 1100, 1091, 1108, 1109,
            ],
            cosmwasm_pool_ids: vec![1616, 1635, 1461, 1514, 1643, 1642, 1463, 1584],
            mnemonic: String::new(),
            rpc_url: "http://localhost:26657".to_owned(),
            lcd_url: "http://localhost:1317".to_owned(),
            pool_info_path: None,
            gas_per_byte: 20,
            base_gas: 710000,
            denom: "uosmo".to_owned(),
            gas_low: 25,
            precision: 4,
            swap_amount: 100000,
            coin_type: 118,
            bech32_prefix: "osmo".to_owned(),
            resync_each_round: true,
            mismatch_retry_limit: 1,
        }
    }
}

impl Config {
    /// Load the configuration, falling back to defaults if the file does
    /// not exist.
    pub(crate) fn load(path: &Path) -> Result<Config> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(error) => {
                warn!(path = %path.display(), %error, "config file not found, using defaults");
                return Ok(Config::default());
            }
        };

        serde_json::from_reader(file)
            .with_context(|| format!("malformed config file {}", path.display()))
    }

    /// All pool ids, in submission order.
    pub(crate) fn pool_ids(&self) -> Vec<u64> {
        let mut ids = self.gamm_pool_ids.clone();
        ids.extend_from_slice(&self.concentrated_pool_ids);
        ids.extend_from_slice(&self.cosmwasm_pool_ids);
        ids
    }
}
