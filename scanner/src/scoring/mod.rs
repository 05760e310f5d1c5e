//! Composite risk scoring
//!
//! Combines the four analyzer sub-scores (0-100 each) into the total:
//! - Contract risk: 40%
//! - Whale activity: 25%
//! - Social signals: 20%
//! - Liquidity health: 15%

pub mod risk_score;

pub use risk_score::{RiskScoreCalculator, SubScores};
