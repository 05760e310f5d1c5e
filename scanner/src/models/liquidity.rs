use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidityPair {
    pub pair_address: String,
    pub liquidity_raw: String,
    pub locked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock_duration_days: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidityHealthResult {
    pub score: u8,
    pub total_liquidity_raw: String,
    pub pairs: Vec<LiquidityPair>,
    pub locked_percentage: f64,
    pub recent_change_score: u8,
    pub volatility_risk: u8,
}

impl LiquidityHealthResult {
    pub fn degraded() -> Self {
        Self {
            score: 40,
            total_liquidity_raw: "0".to_string(),
            pairs: Vec::new(),
            locked_percentage: 0.0,
            recent_change_score: 0,
            volatility_risk: 50,
        }
    }
}
