//! Scan result types, serialized camelCase for API consumers

pub mod analysis;
pub mod contract;
pub mod liquidity;
pub mod social;
pub mod whale;

pub use analysis::{MarketActivity, RiskLevel, TokenAnalysis, TokenIdentity};
pub use contract::{ContractFlag, ContractRiskResult, OwnershipStatus, Severity, TaxRate};
pub use liquidity::{LiquidityHealthResult, LiquidityPair};
pub use social::{CommunityGrowth, PlatformMetrics, Sentiment, SocialSentimentResult};
pub use whale::{
    SuspiciousWallet, TokenHolder, Transaction, TransactionKind, WalletRisk, WhaleActivityResult,
};
