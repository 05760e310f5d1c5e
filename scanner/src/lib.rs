//! Token risk scanner
//!
//! Scores a token from explorer data with four independent analyzers
//! (contract source, social signals, whale activity, liquidity health) and
//! aggregates them into a 0-100 risk score and level.

pub mod address;
pub mod analyzers;
pub mod config;
pub mod engine;
pub mod error;
pub mod identity;
pub mod models;
pub mod random;
pub mod scoring;
pub mod units;

// Re-export commonly used types
pub use config::ScanConfig;
pub use engine::RiskEngine;
pub use error::{AnalyzerError, ScanError};
pub use models::{RiskLevel, TokenAnalysis};
