use std::time::Duration;

use floodgate_types::{AccountResponse, BaseAccount, PoolLiquidity};

use crate::Result;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default path of the pool-info endpoint, relative to the LCD base url.
pub const DEFAULT_POOL_INFO_PATH: &str = "osmosis/poolmanager/v1beta1/pools";

/// Client for the node's REST (LCD) API.
#[derive(Debug, Clone)]
pub struct LcdClient {
    http: reqwest::Client,
    base_url: String,
    pool_info_path: String,
}

impl LcdClient {
    /// Create a new client for the given LCD base url.
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(LcdClient {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            pool_info_path: DEFAULT_POOL_INFO_PATH.to_owned(),
        })
    }

    /// Override the pool-info path for chains that expose it elsewhere.
    pub fn with_pool_info_path(mut self, path: &str) -> Self {
        self.pool_info_path = path.trim_matches('/').to_owned();
        self
    }

    /// Fetch the current sequence and account number of an account.
    pub async fn account(&self, address: &str) -> Result<BaseAccount> {
        let url = format!("{}/cosmos/auth/v1beta1/accounts/{address}", self.base_url);
        let resp: AccountResponse = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(resp.account)
    }

    /// Fetch the total liquidity of a pool.
    pub async fn pool_liquidity(&self, pool_id: u64) -> Result<PoolLiquidity> {
        let url = format!(
            "{}/{}/{pool_id}/total_pool_liquidity",
            self.base_url, self.pool_info_path
        );
        let liquidity = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(liquidity)
    }
}
