use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{lenient_string, parse_timestamp};

/// Token metadata from `/v2/tokens/{address}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenInfo {
    #[serde(default, alias = "address_hash")]
    pub address: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub decimals: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub total_supply: Option<String>,
    #[serde(default, alias = "holders_count", deserialize_with = "lenient_string")]
    pub holders: Option<String>,
    #[serde(default, rename = "type")]
    pub token_type: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl TokenInfo {
    /// A v2 body without a name or symbol is as good as no body
    pub fn is_empty(&self) -> bool {
        self.name.as_deref().map_or(true, str::is_empty)
            && self.symbol.as_deref().map_or(true, str::is_empty)
    }

    pub fn decimals(&self) -> Option<u8> {
        self.decimals.as_deref().and_then(|d| d.parse().ok())
    }

    pub fn holder_count(&self) -> u64 {
        self.holders
            .as_deref()
            .and_then(|h| h.parse().ok())
            .unwrap_or(0)
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }
}

/// Token metadata from the legacy `module=token&action=tokeninfo` endpoint.
///
/// Blockscout and Etherscan-compatible explorers disagree on field names,
/// so both spellings are kept and merged by the accessors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyTokenInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "tokenName")]
    pub token_name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default, rename = "tokenSymbol")]
    pub token_symbol: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub decimals: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub divisor: Option<String>,
    #[serde(default, rename = "totalSupply", deserialize_with = "lenient_string")]
    pub total_supply: Option<String>,
}

impl LegacyTokenInfo {
    pub fn name(&self) -> Option<&str> {
        non_empty(self.name.as_deref()).or_else(|| non_empty(self.token_name.as_deref()))
    }

    pub fn symbol(&self) -> Option<&str> {
        non_empty(self.symbol.as_deref()).or_else(|| non_empty(self.token_symbol.as_deref()))
    }

    pub fn decimals(&self) -> Option<u8> {
        non_empty(self.decimals.as_deref())
            .or_else(|| non_empty(self.divisor.as_deref()))
            .and_then(|d| d.parse().ok())
    }

    pub fn is_empty(&self) -> bool {
        self.name().is_none() && self.symbol().is_none()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_info_numeric_drift() {
        let info: TokenInfo = serde_json::from_str(
            r#"{"address":"0x1","name":"Celo Dollar","symbol":"cUSD","decimals":18,"holders":"1204","total_supply":"1000000000000000000000000"}"#,
        )
        .unwrap();

        assert_eq!(info.decimals(), Some(18));
        assert_eq!(info.holder_count(), 1204);
        assert_eq!(
            info.total_supply.as_deref(),
            Some("1000000000000000000000000")
        );
        assert!(!info.is_empty());
    }

    #[test]
    fn test_token_info_partial() {
        let info: TokenInfo = serde_json::from_str(r#"{"name":null,"decimals":null}"#).unwrap();
        assert!(info.is_empty());
        assert_eq!(info.decimals(), None);
        assert_eq!(info.holder_count(), 0);
    }

    #[test]
    fn test_legacy_token_info_field_spellings() {
        let blockscout: LegacyTokenInfo =
            serde_json::from_str(r#"{"name":"Wrapped","symbol":"WX","decimals":"6"}"#).unwrap();
        assert_eq!(blockscout.name(), Some("Wrapped"));
        assert_eq!(blockscout.decimals(), Some(6));

        let etherscan: LegacyTokenInfo = serde_json::from_str(
            r#"{"tokenName":"Other","tokenSymbol":"OTH","divisor":"8"}"#,
        )
        .unwrap();
        assert_eq!(etherscan.name(), Some("Other"));
        assert_eq!(etherscan.symbol(), Some("OTH"));
        assert_eq!(etherscan.decimals(), Some(8));
    }
}
