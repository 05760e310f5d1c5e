use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{lenient_string, parse_timestamp, AddressRef};

/// Amount block of a transfer item
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransferTotal {
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub decimals: Option<String>,
}

/// One entry of `/v2/tokens/{address}/transfers`
#[derive(Debug, Clone, Deserialize)]
pub struct TransferEntry {
    #[serde(default, alias = "transaction_hash")]
    pub tx_hash: Option<String>,
    #[serde(default)]
    pub from: Option<AddressRef>,
    #[serde(default)]
    pub to: Option<AddressRef>,
    #[serde(default)]
    pub total: Option<TransferTotal>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl TransferEntry {
    pub fn from_hash(&self) -> Option<&str> {
        self.from.as_ref().and_then(AddressRef::hash)
    }

    pub fn to_hash(&self) -> Option<&str> {
        self.to.as_ref().and_then(AddressRef::hash)
    }

    /// Raw amount as a decimal string, "0" when absent
    pub fn value(&self) -> &str {
        self.total
            .as_ref()
            .and_then(|t| t.value.as_deref())
            .unwrap_or("0")
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp.as_deref().and_then(parse_timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_hash_alias_and_total() {
        let entry: TransferEntry = serde_json::from_str(
            r#"{"transaction_hash":"0xfeed","from":{"hash":"0x01"},"to":"0x02",
                "total":{"value":"2000000000000000000","decimals":"18"},
                "timestamp":"2024-05-01T12:00:00Z"}"#,
        )
        .unwrap();

        assert_eq!(entry.tx_hash.as_deref(), Some("0xfeed"));
        assert_eq!(entry.from_hash(), Some("0x01"));
        assert_eq!(entry.to_hash(), Some("0x02"));
        assert_eq!(entry.value(), "2000000000000000000");
        assert!(entry.timestamp().is_some());
    }

    #[test]
    fn test_transfer_without_total() {
        let entry: TransferEntry = serde_json::from_str(r#"{"tx_hash":"0x1"}"#).unwrap();
        assert_eq!(entry.value(), "0");
        assert!(entry.timestamp().is_none());
    }
}
