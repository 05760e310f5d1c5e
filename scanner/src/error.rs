use std::{fmt::Debug, time::Duration};
use thiserror::Error;

/// The only way a scan can fail
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("Invalid token address: `{0}`")]
    InvalidAddress(String),
}

/// Failure of a single analysis stage. Never escapes the engine.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Stage exceeded its {0:?} budget")]
    Timeout(Duration),

    #[error("Stage task panicked: {0}")]
    Panicked(String),

    #[error("Stage failed: {0}")]
    Failed(String),
}

impl From<chain_gateway::GatewayError> for AnalyzerError {
    fn from(err: chain_gateway::GatewayError) -> Self {
        AnalyzerError::Failed(err.to_string())
    }
}
