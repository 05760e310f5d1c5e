use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WalletRisk {
    Low,
    Medium,
    High,
}

/// A holder within the observed holder set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenHolder {
    pub address: String,
    /// Raw balance, decimal string
    pub balance_raw: String,
    /// Share of the observed holder-set supply
    pub percentage: f64,
    pub age_days: u64,
    pub is_contract: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuspiciousWallet {
    pub address: String,
    pub reasons: Vec<String>,
    pub risk_level: WalletRisk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Buy,
    Sell,
    Transfer,
}

/// Token transfer. Kind is always `Transfer`: there is no DEX-router
/// classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub hash: String,
    pub from: String,
    pub to: String,
    pub amount_raw: String,
    /// Unix seconds
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhaleActivityResult {
    pub score: u8,
    pub top_holders: Vec<TokenHolder>,
    pub concentration_pct: f64,
    pub suspicious_wallets: Vec<SuspiciousWallet>,
    pub recent_large_transactions: Vec<Transaction>,
    pub clustering_detected: bool,
}

impl WhaleActivityResult {
    pub fn degraded() -> Self {
        Self {
            score: 40,
            top_holders: Vec::new(),
            concentration_pct: 0.0,
            suspicious_wallets: Vec::new(),
            recent_large_transactions: Vec::new(),
            clustering_detected: false,
        }
    }
}
