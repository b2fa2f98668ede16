//! Swap payload construction.

use std::collections::HashMap;

use async_trait::async_trait;
use floodgate_rpc::LcdClient;
use floodgate_types::proto::{Coin, MsgSwapExactAmountIn, SwapAmountInRoute, TxBody};
use prost::Message;
use tokio::sync::Mutex;
use tracing::debug;

use crate::signer::Wallet;
use crate::{Error, Result};

/// Builds a ready-to-broadcast operation for a given account state and
/// payload identifier.
#[async_trait]
pub trait OperationBuilder: Send + Sync {
    async fn build(&self, sequence: u64, account_number: u64, payload_id: u64) -> Result<Vec<u8>>;
}

/// Everything needed to size, price and address a swap.
#[derive(Debug, Clone)]
pub struct SwapConfig {
    pub chain_id: String,
    /// Denomination swapped out of, and the fee denomination.
    pub base_denom: String,
    /// Input amount of every swap, in `base_denom`.
    pub amount_in: u64,
    pub gas_per_byte: u64,
    pub base_gas: u64,
    /// Low gas price, in tenths-of-precision units of `base_denom`.
    pub gas_low: u64,
    /// Decimal precision of `gas_low`.
    pub precision: u32,
}

/// [`OperationBuilder`] producing signed single-hop swaps against liquidity
/// pools, with the payload identifier selecting the pool.
///
/// The counter asset of each pool is looked up once and cached; pools are
/// static enough that a run never needs to refresh it.
pub struct SwapBuilder {
    wallet: Wallet,
    lcd: LcdClient,
    config: SwapConfig,
    counter_assets: Mutex<HashMap<u64, String>>,
}

impl SwapBuilder {
    pub fn new(wallet: Wallet, lcd: LcdClient, config: SwapConfig) -> Self {
        SwapBuilder {
            wallet,
            lcd,
            config,
            counter_assets: Mutex::new(HashMap::new()),
        }
    }

    /// First liquidity denomination that is not the base one.
    async fn counter_asset(&self, pool_id: u64) -> Result<String> {
        let mut cache = self.counter_assets.lock().await;
        if let Some(denom) = cache.get(&pool_id) {
            return Ok(denom.clone());
        }

        let liquidity = self.lcd.pool_liquidity(pool_id).await?;
        let denom = liquidity
            .liquidity
            .into_iter()
            .map(|coin| coin.denom)
            .find(|denom| *denom != self.config.base_denom)
            .ok_or(Error::NoCounterAsset(pool_id))?;
        debug!(pool_id, denom, "resolved pool counter asset");
        cache.insert(pool_id, denom.clone());
        Ok(denom)
    }

    /// Fee for a given gas limit, rounded up to a whole unit.
    fn fee_for(&self, gas_limit: u64) -> u64 {
        let scale = 10u128.pow(self.config.precision);
        let raw = gas_limit as u128 * self.config.gas_low as u128;
        (raw.div_ceil(scale)) as u64
    }
}

#[async_trait]
impl OperationBuilder for SwapBuilder {
    async fn build(&self, sequence: u64, account_number: u64, pool_id: u64) -> Result<Vec<u8>> {
        let token_out_denom = self.counter_asset(pool_id).await?;

        let msg = MsgSwapExactAmountIn {
            sender: self.wallet.address().to_owned(),
            routes: vec![SwapAmountInRoute {
                pool_id,
                token_out_denom,
            }],
            token_in: Some(Coin {
                denom: self.config.base_denom.clone(),
                amount: self.config.amount_in.to_string(),
            }),
            token_out_min_amount: "1".to_owned(),
        };

        let gas_limit =
            msg.encoded_len() as u64 * self.config.gas_per_byte + self.config.base_gas;
        let fee = Coin {
            denom: self.config.base_denom.clone(),
            amount: self.fee_for(gas_limit).to_string(),
        };

        let body = TxBody {
            messages: vec![msg.into_any()],
            memo: String::new(),
            timeout_height: 0,
        };

        let raw = self.wallet.sign_tx(
            body,
            &self.config.chain_id,
            account_number,
            sequence,
            gas_limit,
            fee,
        )?;
        Ok(raw.encode_to_vec())
    }
}
