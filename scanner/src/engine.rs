//! Risk aggregation
//!
//! `scan` validates the address, resolves the token identity, runs the
//! analyzers as independent tasks and folds their sub-scores into one
//! verdict. Any stage that errors, panics or overruns its budget is replaced
//! by its degraded default, so only an invalid address fails a scan.

use std::{future::Future, sync::Arc, time::Duration};

use chain_gateway::ChainGateway;
use chrono::Utc;
use tracing::{info, warn};

use crate::{
    address::validate_address,
    analyzers::{
        Analyzer, ContractAnalyzer, LiquidityAnalyzer, MarketAnalyzer, ScanTarget,
        SocialAnalyzer, WhaleAnalyzer,
    },
    config::ScanConfig,
    error::{AnalyzerError, ScanError},
    identity::resolve_identity,
    models::{
        ContractRiskResult, LiquidityHealthResult, MarketActivity, SocialSentimentResult,
        TokenAnalysis, TokenIdentity, WhaleActivityResult,
    },
    random::{RandomSource, RngSource},
    scoring::{RiskScoreCalculator, SubScores},
};

type Shared<T> = Arc<dyn Analyzer<Output = T>>;

/// Run `stage` as its own task under `budget`. Panics and overruns come
/// back as errors; an overrunning task is aborted.
async fn run_stage<T, F>(budget: Duration, stage: F) -> Result<T, AnalyzerError>
where
    T: Send + 'static,
    F: Future<Output = Result<T, AnalyzerError>> + Send + 'static,
{
    let mut handle = tokio::spawn(stage);

    match tokio::time::timeout(budget, &mut handle).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_err)) => Err(AnalyzerError::Panicked(join_err.to_string())),
        Err(_) => {
            handle.abort();
            Err(AnalyzerError::Timeout(budget))
        }
    }
}

async fn run_analyzer<T: Send + 'static>(
    analyzer: Shared<T>,
    target: Arc<ScanTarget>,
    budget: Duration,
) -> (&'static str, Result<T, AnalyzerError>) {
    let name = analyzer.name();
    let result = run_stage(budget, async move { analyzer.analyze(&target).await }).await;
    (name, result)
}

fn or_degraded<T>(
    address: &str,
    (stage, result): (&'static str, Result<T, AnalyzerError>),
    degraded: fn() -> T,
) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            warn!("{} analysis degraded for {}: {}", stage, address, err);
            degraded()
        }
    }
}

/// The scan orchestrator. Stateless between scans apart from the social
/// analyzer's random source.
pub struct RiskEngine {
    gateway: Arc<dyn ChainGateway>,
    config: ScanConfig,
    contract: Shared<ContractRiskResult>,
    social: Shared<SocialSentimentResult>,
    whale: Shared<WhaleActivityResult>,
    liquidity: Shared<LiquidityHealthResult>,
    market: Shared<MarketActivity>,
}

impl RiskEngine {
    /// Engine with the explorer-backed analyzers and an entropy-seeded
    /// random source
    pub fn new(gateway: Arc<dyn ChainGateway>, config: ScanConfig) -> Self {
        let random: Arc<dyn RandomSource> = Arc::new(RngSource::from_entropy());

        Self {
            contract: Arc::new(ContractAnalyzer::new(gateway.clone())),
            social: Arc::new(SocialAnalyzer::new(random)),
            whale: Arc::new(WhaleAnalyzer::new(gateway.clone())),
            liquidity: Arc::new(LiquidityAnalyzer::new(
                gateway.clone(),
                config.known_lockers.clone(),
            )),
            market: Arc::new(MarketAnalyzer::new(gateway.clone())),
            gateway,
            config,
        }
    }

    pub fn with_random_source(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.social = Arc::new(SocialAnalyzer::new(random));
        self
    }

    pub fn with_contract_analyzer(mut self, analyzer: Shared<ContractRiskResult>) -> Self {
        self.contract = analyzer;
        self
    }

    pub fn with_social_analyzer(mut self, analyzer: Shared<SocialSentimentResult>) -> Self {
        self.social = analyzer;
        self
    }

    pub fn with_whale_analyzer(mut self, analyzer: Shared<WhaleActivityResult>) -> Self {
        self.whale = analyzer;
        self
    }

    pub fn with_liquidity_analyzer(mut self, analyzer: Shared<LiquidityHealthResult>) -> Self {
        self.liquidity = analyzer;
        self
    }

    /// Identity resolution under the stage budget, unknown identity on overrun
    async fn identity(&self, address: &str) -> TokenIdentity {
        let gateway = self.gateway.clone();
        let owned = address.to_string();

        let resolved = run_stage(self.config.stage_timeout, async move {
            Ok(resolve_identity(gateway.as_ref(), &owned).await)
        })
        .await;

        match resolved {
            Ok(identity) => identity,
            Err(err) => {
                warn!("identity resolution degraded for {}: {}", address, err);
                TokenIdentity::unknown(address)
            }
        }
    }

    pub async fn scan(&self, address: &str) -> Result<TokenAnalysis, ScanError> {
        let address = validate_address(address)?;
        info!("Scanning token {}", address);

        let identity = self.identity(address).await;
        let target = Arc::new(ScanTarget {
            identity,
            now: Utc::now(),
        });
        let budget = self.config.stage_timeout;

        let (contract, social, whale, liquidity, market) = tokio::join!(
            run_analyzer(self.contract.clone(), target.clone(), budget),
            run_analyzer(self.social.clone(), target.clone(), budget),
            run_analyzer(self.whale.clone(), target.clone(), budget),
            run_analyzer(self.liquidity.clone(), target.clone(), budget),
            run_analyzer(self.market.clone(), target.clone(), budget),
        );

        let contract_risk = or_degraded(address, contract, ContractRiskResult::degraded);
        let social_sentiment = or_degraded(address, social, SocialSentimentResult::degraded);
        let whale_activity = or_degraded(address, whale, WhaleActivityResult::degraded);
        let liquidity_health = or_degraded(address, liquidity, LiquidityHealthResult::degraded);
        let market_activity = or_degraded(address, market, MarketActivity::default);

        let total_score = RiskScoreCalculator::total(&SubScores {
            contract: contract_risk.score,
            whale: whale_activity.score,
            social: social_sentiment.score,
            liquidity: liquidity_health.score,
        });
        let risk_level = RiskScoreCalculator::risk_level(total_score);

        info!(
            "Scanned {} ({}): total {} {:?}",
            address, target.identity.symbol, total_score, risk_level
        );

        Ok(TokenAnalysis {
            identity: target.identity.clone(),
            total_score,
            risk_level,
            contract_risk,
            social_sentiment,
            whale_activity,
            liquidity_health,
            market_activity,
            scanned_at_unix_millis: target.now.timestamp_millis(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_stage_ok() {
        let result = run_stage(Duration::from_secs(1), async { Ok::<_, AnalyzerError>(7u8) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_run_stage_contains_panic() {
        let result = run_stage(Duration::from_secs(1), async {
            if true {
                panic!("analyzer blew up");
            }
            Ok::<u8, AnalyzerError>(0)
        })
        .await;

        assert!(matches!(result, Err(AnalyzerError::Panicked(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_stage_times_out() {
        let result = run_stage(Duration::from_secs(5), async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok::<u8, AnalyzerError>(0)
        })
        .await;

        assert!(matches!(result, Err(AnalyzerError::Timeout(d)) if d == Duration::from_secs(5)));
    }
}
