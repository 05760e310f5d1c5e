//! Liquidity depth, lock ratio and volatility
//!
//! Candidate pairs are the contract holders among the largest holders of
//! the token. A pair counts as locked when its address is a known locker.

use std::sync::Arc;

use alloy::primitives::U256;
use async_trait::async_trait;
use chain_gateway::{ChainGateway, HolderEntry, TransferEntry};
use chrono::{DateTime, Duration, Utc};
use futures::future::join_all;

use super::{or_empty, whale::HOLDER_FETCH_LIMIT, Analyzer, ScanTarget};
use crate::{
    error::AnalyzerError,
    models::{LiquidityHealthResult, LiquidityPair},
    units::{parse_raw, pow10, u256_to_f64},
};

/// Known liquidity locker contract addresses. Unicrypt, PinkSale and Mudra
/// are their BSC deployments; set `KNOWN_LOCKERS` for other networks.
pub mod lockers {
    /// Unicrypt locker
    pub const UNICRYPT: &str = "0xc765bddb93b0d1c1a88282ba0fa6b2d00e3e0c83";
    /// PinkSale locker
    pub const PINKSALE: &str = "0x407993575c91ce7643a4d4ccacc9a98c36ee1bbe";
    /// Mudra locker
    pub const MUDRA: &str = "0xae34bd8a0d1153e51a11a59df23598c304dc5abc";
    /// Placeholder locker used on test networks
    pub const PLACEHOLDER: &str = "0x0000000000000000000000000000000000000001";

    pub fn defaults() -> Vec<String> {
        [UNICRYPT, PINKSALE, MUDRA, PLACEHOLDER]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}

/// Largest holders inspected for pair candidates
pub const PAIR_CANDIDATES: usize = 10;

const PAIR_NAME_HINTS: [&str; 3] = ["pair", "lp", "pool"];

fn looks_like_pair(name: &str) -> bool {
    let name = name.to_lowercase();
    PAIR_NAME_HINTS.iter().any(|hint| name.contains(hint))
}

fn one_token() -> U256 {
    pow10(18)
}

/// Penalty for shallow liquidity: < 1, < 10, < 100 tokens (18 decimals)
pub fn liquidity_tier(total: U256) -> u32 {
    if total < pow10(18) {
        40
    } else if total < pow10(19) {
        30
    } else if total < pow10(20) {
        20
    } else {
        0
    }
}

pub fn total_liquidity(pairs: &[LiquidityPair]) -> U256 {
    pairs
        .iter()
        .fold(U256::ZERO, |sum, p| sum.saturating_add(parse_raw(&p.liquidity_raw)))
}

/// Locked share of total pair liquidity, 0-100
pub fn locked_percentage(pairs: &[LiquidityPair]) -> f64 {
    let total = u256_to_f64(total_liquidity(pairs));
    if total <= 0.0 {
        return 0.0;
    }

    let locked = pairs
        .iter()
        .filter(|p| p.locked)
        .fold(U256::ZERO, |sum, p| sum.saturating_add(parse_raw(&p.liquidity_raw)));

    (u256_to_f64(locked) / total * 100.0).min(100.0)
}

/// 5 points per transfer above one token in the last 24 hours, max 50
pub fn recent_change_score(transfers: &[TransferEntry], now: DateTime<Utc>) -> u8 {
    let since = now - Duration::hours(24);
    let threshold = one_token();

    let large = transfers
        .iter()
        .filter(|t| t.timestamp().is_some_and(|ts| ts > since))
        .filter(|t| parse_raw(t.value()) > threshold)
        .count();

    (large * 5).min(50) as u8
}

pub fn volatility_risk(total: U256, pairs: &[LiquidityPair]) -> u8 {
    let mut risk = liquidity_tier(total);

    risk += match pairs.len() {
        0 => 30,
        1 => 20,
        _ => 0,
    };

    if !pairs.iter().any(|p| p.locked) {
        risk += 20;
    }

    risk.min(100) as u8
}

pub fn liquidity_score(
    total: U256,
    locked_percentage: f64,
    recent_change: u8,
    volatility: u8,
    pair_count: usize,
) -> u8 {
    let mut score = liquidity_tier(total);

    score += match locked_percentage {
        p if p < 20.0 => 25,
        p if p < 50.0 => 15,
        _ => 0,
    };

    score += u32::from(recent_change.min(20));

    score += match pair_count {
        0 => 30,
        1 => 15,
        _ => 0,
    };

    score += (f64::from(volatility) * 0.15).round() as u32;

    score.min(100) as u8
}

/// Liquidity analyzer backed by the explorer
pub struct LiquidityAnalyzer {
    gateway: Arc<dyn ChainGateway>,
    known_lockers: Vec<String>,
}

impl LiquidityAnalyzer {
    pub fn new(gateway: Arc<dyn ChainGateway>, known_lockers: Vec<String>) -> Self {
        Self {
            gateway,
            known_lockers: known_lockers.into_iter().map(|l| l.to_lowercase()).collect(),
        }
    }

    pub fn is_known_locker(&self, address: &str) -> bool {
        let address = address.to_lowercase();
        self.known_lockers.iter().any(|l| *l == address)
    }

    /// Whether a zero-balance contract holder is named like a DEX pair
    async fn named_like_pair(&self, entry: &HolderEntry, address: &str) -> bool {
        if entry.name().is_some_and(looks_like_pair) {
            return true;
        }

        match self.gateway.address_info(address).await {
            Ok(Some(info)) => info.name.as_deref().is_some_and(looks_like_pair),
            _ => false,
        }
    }

    async fn candidate(&self, entry: &HolderEntry) -> Option<LiquidityPair> {
        let address = entry.hash()?;
        if !entry.is_contract() {
            return None;
        }

        let has_balance = !parse_raw(entry.value()).is_zero();
        if !has_balance && !self.named_like_pair(entry, address).await {
            return None;
        }

        Some(LiquidityPair {
            pair_address: address.to_string(),
            liquidity_raw: entry.value().to_string(),
            locked: self.is_known_locker(address),
            lock_duration_days: None,
        })
    }

    async fn find_pairs(&self, holders: &[HolderEntry]) -> Vec<LiquidityPair> {
        join_all(
            holders
                .iter()
                .take(PAIR_CANDIDATES)
                .map(|entry| self.candidate(entry)),
        )
        .await
        .into_iter()
        .flatten()
        .collect()
    }
}

#[async_trait]
impl Analyzer for LiquidityAnalyzer {
    type Output = LiquidityHealthResult;

    fn name(&self) -> &'static str {
        "liquidity"
    }

    async fn analyze(&self, target: &ScanTarget) -> Result<LiquidityHealthResult, AnalyzerError> {
        let address = target.address();

        let (holders, transfers) = tokio::join!(
            self.gateway.token_holders(address, HOLDER_FETCH_LIMIT),
            self.gateway.token_transfers(address, Some("ERC-20")),
        );
        let holders = or_empty("liquidity", "holders", holders);
        let transfers = or_empty("liquidity", "transfers", transfers);

        let pairs = self.find_pairs(&holders).await;
        let total = total_liquidity(&pairs);
        let locked_percentage = locked_percentage(&pairs);
        let recent_change_score = recent_change_score(&transfers, target.now);
        let volatility_risk = volatility_risk(total, &pairs);

        Ok(LiquidityHealthResult {
            score: liquidity_score(
                total,
                locked_percentage,
                recent_change_score,
                volatility_risk,
                pairs.len(),
            ),
            total_liquidity_raw: total.to_string(),
            pairs,
            locked_percentage,
            recent_change_score,
            volatility_risk,
        })
    }
}
