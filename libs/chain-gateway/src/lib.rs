//! Read-only client for Blockscout-style block explorers.
//!
//! The explorer is treated as unreliable: every response field is optional
//! and numeric fields are accepted as either strings or numbers.

use std::{env, time::Duration};

pub mod client;
pub mod entity;
pub mod error;

// Re-export commonly used types
pub use client::{BlockscoutClient, ChainGateway};
pub use entity::{
    parse_timestamp, AddressInfo, AddressRef, AddressTransaction, HolderEntry, LegacyTokenInfo,
    SmartContract, TokenInfo, TransferEntry, TxDirection,
};
pub use error::GatewayError;

mod defaults {
    pub const GATEWAY_URL: &str = "https://celo-sepolia.blockscout.com/api";
    pub const GATEWAY_TIMEOUT_SECS: &str = "10";
    pub const GATEWAY_METADATA_TIMEOUT_SECS: &str = "15";
}

/// Explorer connection settings
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub metadata_timeout: Duration,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, GatewayError> {
        let base_url =
            env::var("GATEWAY_URL").unwrap_or(String::from(defaults::GATEWAY_URL));

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(GatewayError::InvalidConfig(format!(
                "GATEWAY_URL must be an http(s) URL, got `{}`",
                base_url
            )));
        }

        Ok(Self {
            base_url,
            timeout: secs_var("GATEWAY_TIMEOUT_SECS", defaults::GATEWAY_TIMEOUT_SECS)?,
            metadata_timeout: secs_var(
                "GATEWAY_METADATA_TIMEOUT_SECS",
                defaults::GATEWAY_METADATA_TIMEOUT_SECS,
            )?,
        })
    }
}

fn secs_var(name: &str, default: &str) -> Result<Duration, GatewayError> {
    env::var(name)
        .unwrap_or(String::from(default))
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| GatewayError::InvalidConfig(format!("`{}` must be a number of seconds", name)))
}

pub fn initialize_gateway() -> Result<BlockscoutClient, GatewayError> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = GatewayConfig::from_env()?;

    BlockscoutClient::new(config.base_url, config.timeout, config.metadata_timeout)
}
