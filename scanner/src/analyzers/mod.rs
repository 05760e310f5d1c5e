//! Risk analyzers
//!
//! Each analyzer produces one sub-score (0-100) from explorer data. They
//! share no state and are run concurrently by the engine, which swaps in
//! the `degraded()` result of any analyzer that errors, panics or overruns
//! its time budget.

pub mod contract;
pub mod liquidity;
pub mod market;
pub mod social;
pub mod whale;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::warn;

use crate::{error::AnalyzerError, models::TokenIdentity};

pub use contract::ContractAnalyzer;
pub use liquidity::LiquidityAnalyzer;
pub use market::MarketAnalyzer;
pub use social::SocialAnalyzer;
pub use whale::WhaleAnalyzer;

/// Input shared by all analyzers of one scan
#[derive(Debug, Clone)]
pub struct ScanTarget {
    pub identity: TokenIdentity,
    /// Reference time for every age and recency check of the scan
    pub now: DateTime<Utc>,
}

impl ScanTarget {
    pub fn address(&self) -> &str {
        &self.identity.address
    }
}

#[async_trait]
pub trait Analyzer: Send + Sync {
    type Output: Send + 'static;

    fn name(&self) -> &'static str;

    async fn analyze(&self, target: &ScanTarget) -> Result<Self::Output, AnalyzerError>;
}

/// Unwrap a gateway result, logging and substituting `T::default()` on error
pub(crate) fn or_empty<T: Default>(
    stage: &str,
    what: &str,
    result: Result<T, chain_gateway::GatewayError>,
) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            warn!("{}: failed to fetch {}: {}", stage, what, err);
            T::default()
        }
    }
}

/// Whole days elapsed between `then` and `now`, never negative
pub(crate) fn days_between(then: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    (now - then).num_days().max(0) as u64
}
