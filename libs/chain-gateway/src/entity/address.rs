use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{parse_timestamp, AddressRef};

/// Direction filter for `/v2/addresses/{address}/transactions`. Only
/// incoming transactions are ever filtered for (wallet age).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxDirection {
    To,
}

impl TxDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxDirection::To => "to",
        }
    }
}

/// Address details from `/v2/addresses/{address}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressInfo {
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_contract: Option<bool>,
    #[serde(default)]
    pub creation_tx_hash: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl AddressInfo {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }
}

/// One entry of `/v2/addresses/{address}/transactions`
#[derive(Debug, Clone, Deserialize)]
pub struct AddressTransaction {
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default)]
    pub from: Option<AddressRef>,
    #[serde(default)]
    pub to: Option<AddressRef>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl AddressTransaction {
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp.as_deref().and_then(parse_timestamp)
    }
}
