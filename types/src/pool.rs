use serde::{Deserialize, Serialize};

/// Result of the LCD `total_pool_liquidity` query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolLiquidity {
    /// Assets held by the pool.
    pub liquidity: Vec<LiquidityCoin>,
}

/// A single asset of a pool's liquidity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityCoin {
    /// Denomination of the asset.
    pub denom: String,
    /// Amount held, as a decimal string.
    pub amount: String,
}
