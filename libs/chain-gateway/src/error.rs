use std::fmt::Debug;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Invalid gateway configuration: {0}")]
    InvalidConfig(String),

    #[error("Rate limited by explorer (429)")]
    RateLimited,

    #[error("Explorer returned HTTP {0}")]
    Status(u16),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to decode explorer response: {0}")]
    Decode(String),
}
