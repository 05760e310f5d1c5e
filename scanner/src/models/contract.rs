use serde::{Deserialize, Serialize};

/// Severity of a contract red flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// One detected red flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractFlag {
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub points: u8,
}

impl ContractFlag {
    pub fn new(severity: Severity, title: &str, description: impl Into<String>, points: u8) -> Self {
        Self {
            severity,
            title: title.to_string(),
            description: description.into(),
            points,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OwnershipStatus {
    Renounced,
    ActiveOwner,
    NoOwnerFunction,
    Unknown,
}

/// Declared buy/sell tax in percent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate {
    pub buy: u64,
    pub sell: u64,
}

/// Result of the contract source inspection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractRiskResult {
    pub score: u8,
    pub flags: Vec<ContractFlag>,
    pub ownership_status: OwnershipStatus,
    pub mintable: bool,
    pub pausable: bool,
    pub has_hidden_functions: bool,
    pub tax_rate: TaxRate,
    pub verified: bool,
    pub deployment_age_days: u64,
}

impl ContractRiskResult {
    /// Stand-in used when the analysis could not complete
    pub fn degraded() -> Self {
        Self {
            score: 50,
            flags: vec![ContractFlag::new(
                Severity::Medium,
                "Analysis Incomplete",
                "Unable to fully analyze contract",
                50,
            )],
            ownership_status: OwnershipStatus::Unknown,
            mintable: false,
            pausable: false,
            has_hidden_functions: false,
            tax_rate: TaxRate::default(),
            verified: false,
            deployment_age_days: 0,
        }
    }
}
