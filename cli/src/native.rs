use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

use floodgate_engine::{
    verify_accepted, EndpointRegistry, HttpNode, NodeClient, RoundScheduler, SchedulerConfig,
    SwapBuilder, SwapConfig, Wallet,
};
use floodgate_rpc::{Client, LcdClient};

use crate::config::Config;

#[derive(Debug, Parser)]
pub(crate) struct Params {
    /// Path of the JSON configuration file
    #[arg(short, long, default_value = "config.json")]
    pub(crate) config: PathBuf,

    /// Consensus RPC url, overriding the configured one
    #[arg(long)]
    pub(crate) rpc_url: Option<String>,

    /// REST API url, overriding the configured one
    #[arg(long)]
    pub(crate) lcd_url: Option<String>,
}

pub(crate) async fn run(args: Params) -> Result<()> {
    let mut config = Config::load(&args.config)?;
    if let Some(rpc_url) = args.rpc_url {
        config.rpc_url = rpc_url;
    }
    if let Some(lcd_url) = args.lcd_url {
        config.lcd_url = lcd_url;
    }
    if config.mnemonic.is_empty() {
        bail!("no mnemonic configured, refusing to run");
    }

    let wallet = Wallet::from_mnemonic(&config.mnemonic, config.coin_type, &config.bech32_prefix)
        .context("failed to derive the signing key")?;
    info!(address = wallet.address(), "derived signing account");

    let comet = Client::new(&config.rpc_url)
        .await
        .context("failed to connect to the consensus RPC")?;
    let mut lcd = LcdClient::new(&config.lcd_url).context("failed to create the REST client")?;
    if let Some(path) = &config.pool_info_path {
        lcd = lcd.with_pool_info_path(path);
    }
    let node: Arc<dyn NodeClient> = Arc::new(HttpNode::new(comet, lcd.clone()));

    let chain_id = node
        .chain_id()
        .await
        .context("failed to query the chain id")?;
    let account = node
        .account_state(wallet.address())
        .await
        .context("failed to query the account")?;
    info!(
        chain_id,
        sequence = account.sequence,
        account_number = account.account_number,
        "connected"
    );

    let mut registry = EndpointRegistry::new();
    let id = registry.insert(wallet.address().to_owned(), node.clone());
    let endpoint = registry.get_mut(id).context("endpoint just inserted")?;
    endpoint
        .tracker
        .resync(account.sequence, account.account_number);
    let endpoint = registry.into_primary().context("endpoint just inserted")?;

    let builder = SwapBuilder::new(
        wallet,
        lcd,
        SwapConfig {
            chain_id,
            base_denom: config.denom.clone(),
            amount_in: config.swap_amount,
            gas_per_byte: config.gas_per_byte,
            base_gas: config.base_gas,
            gas_low: config.gas_low,
            precision: config.precision,
        },
    );

    let scheduler = RoundScheduler::new(
        endpoint,
        builder,
        config.pool_ids(),
        SchedulerConfig {
            resync_each_round: config.resync_each_round,
            mismatch_retry_limit: config.mismatch_retry_limit,
        },
    );
    let (_, stats) = scheduler.run().await?;

    info!(
        accepted = stats.accepted_hashes().len(),
        "all rounds completed, verifying accepted operations"
    );
    let failed = verify_accepted(node.as_ref(), stats.accepted_hashes()).await;

    println!("{}", stats.into_summary(failed));
    Ok(())
}
