//! Scan result cache
//!
//! Owned by the API, never by the engine. Redis-backed when `REDIS_URL` is
//! set, in-process otherwise. Entries expire after the configured TTL.

use std::{
    collections::HashMap,
    env,
    sync::Arc,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, AsyncCommands, Client};
use scanner::TokenAnalysis;
use tokio::sync::RwLock;

use crate::error::ApiError;

fn cache_key(address: &str) -> String {
    format!("scan:{}", address.to_lowercase())
}

#[async_trait]
pub trait ScanCache: Send + Sync {
    async fn get(&self, address: &str) -> Result<Option<TokenAnalysis>, ApiError>;

    async fn put(&self, address: &str, analysis: &TokenAnalysis) -> Result<(), ApiError>;
}

/// Redis cache storing analyses as JSON with `SET EX`
pub struct RedisScanCache {
    connection: MultiplexedConnection,
    ttl: Duration,
}

impl RedisScanCache {
    pub async fn new(redis_url: &str, ttl: Duration) -> Result<Self, ApiError> {
        let client = Client::open(redis_url).map_err(|e| ApiError::Cache(e.to_string()))?;

        let connection = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| ApiError::Cache(e.to_string()))?;

        tracing::info!("Connected to Redis at {}", redis_url);
        Ok(Self { connection, ttl })
    }
}

#[async_trait]
impl ScanCache for RedisScanCache {
    async fn get(&self, address: &str) -> Result<Option<TokenAnalysis>, ApiError> {
        let mut connection = self.connection.clone();

        let cached: Option<String> = connection
            .get(cache_key(address))
            .await
            .map_err(|e| ApiError::Cache(e.to_string()))?;

        cached
            .map(|json| serde_json::from_str(&json))
            .transpose()
            .map_err(|e| ApiError::Cache(e.to_string()))
    }

    async fn put(&self, address: &str, analysis: &TokenAnalysis) -> Result<(), ApiError> {
        let mut connection = self.connection.clone();
        let payload =
            serde_json::to_string(analysis).map_err(|e| ApiError::Cache(e.to_string()))?;

        connection
            .set_ex::<_, _, ()>(cache_key(address), payload, self.ttl.as_secs().max(1))
            .await
            .map_err(|e| ApiError::Cache(e.to_string()))
    }
}

/// In-process cache used when no Redis is configured
pub struct MemoryScanCache {
    entries: RwLock<HashMap<String, (Instant, TokenAnalysis)>>,
    ttl: Duration,
}

impl MemoryScanCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }
}

#[async_trait]
impl ScanCache for MemoryScanCache {
    async fn get(&self, address: &str) -> Result<Option<TokenAnalysis>, ApiError> {
        let entries = self.entries.read().await;

        Ok(entries
            .get(&cache_key(address))
            .filter(|(stored_at, _)| stored_at.elapsed() < self.ttl)
            .map(|(_, analysis)| analysis.clone()))
    }

    async fn put(&self, address: &str, analysis: &TokenAnalysis) -> Result<(), ApiError> {
        let mut entries = self.entries.write().await;

        // drop expired entries so the map does not grow without bound
        entries.retain(|_, (stored_at, _)| stored_at.elapsed() < self.ttl);
        entries.insert(cache_key(address), (Instant::now(), analysis.clone()));
        Ok(())
    }
}

/// Redis when `REDIS_URL` is set, memory otherwise
pub async fn connect(ttl: Duration) -> Result<Arc<dyn ScanCache>, ApiError> {
    match env::var("REDIS_URL") {
        Ok(redis_url) => Ok(Arc::new(RedisScanCache::new(&redis_url, ttl).await?)),
        Err(_) => {
            tracing::info!("REDIS_URL not set, caching scans in memory");
            Ok(Arc::new(MemoryScanCache::new(ttl)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanner::models::{
        ContractRiskResult, LiquidityHealthResult, MarketActivity, RiskLevel,
        SocialSentimentResult, TokenIdentity, WhaleActivityResult,
    };

    const ADDRESS: &str = "0x765DE816845861e75A25fCA122bb6898B8B1282a";

    fn analysis() -> TokenAnalysis {
        TokenAnalysis {
            identity: TokenIdentity::unknown(ADDRESS),
            total_score: 42,
            risk_level: RiskLevel::Medium,
            contract_risk: ContractRiskResult::degraded(),
            social_sentiment: SocialSentimentResult::degraded(),
            whale_activity: WhaleActivityResult::degraded(),
            liquidity_health: LiquidityHealthResult::degraded(),
            market_activity: MarketActivity::default(),
            scanned_at_unix_millis: 1_700_000_000_000,
        }
    }

    #[tokio::test]
    async fn test_memory_cache_hit_ignores_address_case() {
        let cache = MemoryScanCache::new(Duration::from_secs(300));
        assert!(cache.get(ADDRESS).await.unwrap().is_none());

        cache.put(ADDRESS, &analysis()).await.unwrap();

        let hit = cache.get(&ADDRESS.to_lowercase()).await.unwrap();
        assert_eq!(hit, Some(analysis()));
    }

    #[tokio::test]
    async fn test_memory_cache_expiry() {
        let cache = MemoryScanCache::new(Duration::ZERO);
        cache.put(ADDRESS, &analysis()).await.unwrap();

        assert!(cache.get(ADDRESS).await.unwrap().is_none());
    }

    #[test]
    fn test_cache_key() {
        assert_eq!(
            cache_key(ADDRESS),
            "scan:0x765de816845861e75a25fca122bb6898b8b1282a"
        );
    }
}
