use serde::{Deserialize, Serialize};

use super::{
    ContractRiskResult, LiquidityHealthResult, SocialSentimentResult, WhaleActivityResult,
};

/// Resolved token identity, fixed for the duration of a scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenIdentity {
    pub address: String,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl TokenIdentity {
    pub fn unknown(address: &str) -> Self {
        Self {
            address: address.to_string(),
            name: "Unknown Token".to_string(),
            symbol: "UNKNOWN".to_string(),
            decimals: 18,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// Activity counters the explorer can supply cheaply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketActivity {
    pub recent_transfers: u64,
    pub holder_count: u64,
}

/// Root aggregate returned by a scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAnalysis {
    #[serde(flatten)]
    pub identity: TokenIdentity,
    pub total_score: u8,
    pub risk_level: RiskLevel,
    pub contract_risk: ContractRiskResult,
    pub social_sentiment: SocialSentimentResult,
    pub whale_activity: WhaleActivityResult,
    pub liquidity_health: LiquidityHealthResult,
    pub market_activity: MarketActivity,
    pub scanned_at_unix_millis: i64,
}
