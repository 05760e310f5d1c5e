use std::sync::Arc;

use async_trait::async_trait;
use chain_gateway::ChainGateway;
use chrono::Duration;

use super::{Analyzer, ScanTarget};
use crate::{error::AnalyzerError, models::MarketActivity};

/// Holder count and 24h transfer count, the activity figures the explorer
/// reports directly. Any explorer failure fails the stage, which the engine
/// turns into zeros.
pub struct MarketAnalyzer {
    gateway: Arc<dyn ChainGateway>,
}

impl MarketAnalyzer {
    pub fn new(gateway: Arc<dyn ChainGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl Analyzer for MarketAnalyzer {
    type Output = MarketActivity;

    fn name(&self) -> &'static str {
        "market"
    }

    async fn analyze(&self, target: &ScanTarget) -> Result<MarketActivity, AnalyzerError> {
        let address = target.address();
        let since = target.now - Duration::hours(24);

        let (token, transfers) = tokio::join!(
            self.gateway.token_info(address),
            self.gateway.token_transfers(address, Some("ERC-20")),
        );

        let holder_count = token?.map_or(0, |info| info.holder_count());
        let recent_transfers = transfers?
            .iter()
            .filter(|t| t.timestamp().is_some_and(|ts| ts > since))
            .count() as u64;

        Ok(MarketActivity {
            recent_transfers,
            holder_count,
        })
    }
}
