use serde::Deserialize;

/// Verified contract details from `/v2/smart-contracts/{address}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SmartContract {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub source_code: Option<String>,
    #[serde(default)]
    pub is_verified: Option<bool>,
    #[serde(default)]
    pub compiler_version: Option<String>,
}

impl SmartContract {
    /// Source text when present and non-blank
    pub fn source(&self) -> Option<&str> {
        self.source_code
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }
}

/// One entry of the legacy `module=contract&action=getsourcecode` result
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacySourceEntry {
    #[serde(default, rename = "SourceCode")]
    pub source_code: Option<String>,
    #[serde(default, rename = "ContractName")]
    pub contract_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::LegacyEnvelope;

    #[test]
    fn test_blank_source_is_none() {
        let contract: SmartContract =
            serde_json::from_str(r#"{"name":"Token","source_code":"   "}"#).unwrap();
        assert!(contract.source().is_none());
    }

    #[test]
    fn test_legacy_source_envelope() {
        let envelope: LegacyEnvelope = serde_json::from_str(
            r#"{"status":"1","message":"OK","result":[{"SourceCode":"contract A {}","ContractName":"A"}]}"#,
        )
        .unwrap();

        let first: LegacySourceEntry = envelope.first().unwrap();
        assert_eq!(first.source_code.as_deref(), Some("contract A {}"));
    }
}
