use serde::Deserialize;

use super::{lenient_string, AddressRef};

/// One entry of `/v2/tokens/{address}/holders`
#[derive(Debug, Clone, Deserialize)]
pub struct HolderEntry {
    #[serde(default)]
    pub address: Option<AddressRef>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: Option<String>,
}

impl HolderEntry {
    pub fn hash(&self) -> Option<&str> {
        self.address.as_ref().and_then(AddressRef::hash)
    }

    pub fn is_contract(&self) -> bool {
        self.address.as_ref().is_some_and(AddressRef::is_contract)
    }

    pub fn name(&self) -> Option<&str> {
        self.address.as_ref().and_then(AddressRef::name)
    }

    /// Raw balance as a decimal string, "0" when absent
    pub fn value(&self) -> &str {
        self.value.as_deref().unwrap_or("0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Page;

    #[test]
    fn test_holder_page_decoding() {
        let page: Page<HolderEntry> = serde_json::from_str(
            r#"{"items":[
                {"address":{"hash":"0xaa","is_contract":false},"value":"5000"},
                {"address":"0xbb","value":42},
                {"value":"1"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(page.items.len(), 3);
        assert_eq!(page.items[0].hash(), Some("0xaa"));
        assert_eq!(page.items[1].value(), "42");
        assert_eq!(page.items[2].hash(), None);
        assert!(!page.items[2].is_contract());
    }

    #[test]
    fn test_numeric_balance_above_u64() {
        let entry: HolderEntry =
            serde_json::from_str(r#"{"address":"0xaa","value":1000000000000000000000000}"#)
                .unwrap();

        assert_eq!(entry.value(), "1000000000000000000000000");
    }
}
