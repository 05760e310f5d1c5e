// Blockscout v2 entities
pub mod address;
pub mod holder;
pub mod smart_contract;
pub mod token;
pub mod transfer;

// Re-exports for convenience
pub use address::{AddressInfo, AddressTransaction, TxDirection};
pub use holder::HolderEntry;
pub use smart_contract::{LegacySourceEntry, SmartContract};
pub use token::{LegacyTokenInfo, TokenInfo};
pub use transfer::TransferEntry;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value as JsonValue;

/// Paginated list wrapper used by every v2 collection endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Envelope of the legacy `?module=...&action=...` endpoints.
///
/// `result` is an object, a list of objects, or an error string depending on
/// the explorer and the outcome, so it is kept raw until asked for.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyEnvelope {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub result: Option<JsonValue>,
}

impl LegacyEnvelope {
    /// First result object, whichever shape the explorer chose
    pub fn first<T: DeserializeOwned>(self) -> Option<T> {
        match self.result? {
            JsonValue::Array(items) => items
                .into_iter()
                .next()
                .and_then(|item| serde_json::from_value(item).ok()),
            value @ JsonValue::Object(_) => serde_json::from_value(value).ok(),
            _ => None,
        }
    }
}

/// Address reference as embedded in holder, transfer and transaction items.
///
/// Newer explorers nest an object (`{"hash": ..., "is_contract": ...}`),
/// older ones return the bare hash string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AddressRef {
    Object {
        #[serde(default)]
        hash: Option<String>,
        #[serde(default)]
        is_contract: Option<bool>,
        #[serde(default)]
        name: Option<String>,
    },
    Hash(String),
}

impl AddressRef {
    pub fn hash(&self) -> Option<&str> {
        match self {
            AddressRef::Object { hash, .. } => hash.as_deref(),
            AddressRef::Hash(hash) => Some(hash.as_str()),
        }
    }

    pub fn is_contract(&self) -> bool {
        match self {
            AddressRef::Object { is_contract, .. } => is_contract.unwrap_or(false),
            AddressRef::Hash(_) => false,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            AddressRef::Object { name, .. } => name.as_deref(),
            AddressRef::Hash(_) => None,
        }
    }
}

/// Parse an explorer timestamp (RFC 3339, e.g. `2024-05-01T12:00:00.000000Z`)
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Accept a string, a number, or null for fields whose JSON type drifts
/// between explorer versions (`decimals`, `holders`, `value`...).
///
/// Integers past `u64::MAX` arrive as f64 and are written out in plain
/// decimal, never exponent notation, so raw amounts stay parseable.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<JsonValue>::deserialize(deserializer)?;

    Ok(match value {
        Some(JsonValue::String(s)) if !s.is_empty() => Some(s),
        Some(JsonValue::Number(n)) => Some(number_to_decimal(&n)),
        _ => None,
    })
}

fn number_to_decimal(n: &serde_json::Number) -> String {
    if let Some(int) = n.as_u64() {
        return int.to_string();
    }

    match n.as_f64() {
        Some(float) if float.is_finite() && float.fract() == 0.0 => format!("{}", float),
        _ => n.to_string(),
    }
}
