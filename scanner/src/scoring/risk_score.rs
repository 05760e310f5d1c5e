//! Risk Score Calculator
//!
//! The weights and the level thresholds are fixed: results from different
//! deployments must be comparable.

use crate::models::RiskLevel;

pub const CONTRACT_WEIGHT: f64 = 0.40;
pub const WHALE_WEIGHT: f64 = 0.25;
pub const SOCIAL_WEIGHT: f64 = 0.20;
pub const LIQUIDITY_WEIGHT: f64 = 0.15;

/// Analyzer sub-scores, each 0-100
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubScores {
    pub contract: u8,
    pub whale: u8,
    pub social: u8,
    pub liquidity: u8,
}

pub struct RiskScoreCalculator;

impl RiskScoreCalculator {
    /// Weighted total, rounded half away from zero and clamped to 0-100
    pub fn total(scores: &SubScores) -> u8 {
        let weighted = f64::from(scores.contract.min(100)) * CONTRACT_WEIGHT
            + f64::from(scores.whale.min(100)) * WHALE_WEIGHT
            + f64::from(scores.social.min(100)) * SOCIAL_WEIGHT
            + f64::from(scores.liquidity.min(100)) * LIQUIDITY_WEIGHT;

        weighted.round().clamp(0.0, 100.0) as u8
    }

    /// ≤30 LOW, ≤60 MEDIUM, ≤85 HIGH, else CRITICAL
    pub fn risk_level(total: u8) -> RiskLevel {
        match total {
            0..=30 => RiskLevel::Low,
            31..=60 => RiskLevel::Medium,
            61..=85 => RiskLevel::High,
            _ => RiskLevel::Critical,
        }
    }
}
