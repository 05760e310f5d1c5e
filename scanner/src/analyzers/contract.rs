//! Contract source inspection
//!
//! Pattern checks over verified source text. No bytecode analysis: an
//! unverified contract gets a single flag and nothing else is inspected.

use std::sync::Arc;

use async_trait::async_trait;
use chain_gateway::{ChainGateway, TokenInfo};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use super::{days_between, or_empty, Analyzer, ScanTarget};
use crate::{
    error::AnalyzerError,
    models::{ContractFlag, ContractRiskResult, OwnershipStatus, Severity, TaxRate},
};

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid contract pattern")
}

static MINT: Lazy<Regex> = Lazy::new(|| re(r"(?i)function\s+mint\s*\("));
static OWNER_CONTROLS: Lazy<Regex> = Lazy::new(|| re(r"(?i)onlyOwner|Ownable"));
static BLACKLIST: Lazy<Regex> = Lazy::new(|| re(r"(?i)blacklist|blacklisted"));
static PAUSE: Lazy<Regex> = Lazy::new(|| re(r"(?i)pause|whenNotPaused"));
static PROXY: Lazy<Regex> = Lazy::new(|| re(r"(?i)proxy|upgradeable|UUPS|delegatecall"));
static TAX: Lazy<Regex> = Lazy::new(|| re(r"(?i)tax[^0-9]+([0-9]+)"));
static SELF_DESTRUCT: Lazy<Regex> = Lazy::new(|| re(r"(?i)selfdestruct|suicide"));

static RENOUNCED: Lazy<Regex> = Lazy::new(|| re(r"(?i)renounceOwnership|owner.*=.*address\(0\)"));
static OWNER_FN: Lazy<Regex> = Lazy::new(|| re(r"(?i)owner\s*\(\)"));
static BUY_TAX: Lazy<Regex> = Lazy::new(|| re(r"(?i)buyTax[^0-9]+([0-9]+)"));
static SELL_TAX: Lazy<Regex> = Lazy::new(|| re(r"(?i)sellTax[^0-9]+([0-9]+)"));
static HIDDEN: Lazy<Vec<Regex>> = Lazy::new(|| {
    [r"(?i)assembly\s*\{", r"(?i)delegatecall", r"(?i)callcode", r"(?i)\.call\("]
        .into_iter()
        .map(re)
        .collect()
});

/// Declared tax above this percentage is flagged
const TAX_THRESHOLD: u64 = 10;

/// One source-level red flag check
struct RedFlagRule {
    detect: fn(&str) -> bool,
    severity: Severity,
    title: &'static str,
    description: &'static str,
    points: u8,
}

/// Checks in reporting order
const RED_FLAG_RULES: &[RedFlagRule] = &[
    RedFlagRule {
        detect: |src| MINT.is_match(src),
        severity: Severity::Critical,
        title: "Mint Function Detected",
        description: "Contract contains mint function that could inflate supply",
        points: 30,
    },
    RedFlagRule {
        detect: |src| OWNER_CONTROLS.is_match(src),
        severity: Severity::Medium,
        title: "Owner Controls",
        description: "Contract has owner-controlled functions",
        points: 15,
    },
    RedFlagRule {
        detect: |src| BLACKLIST.is_match(src),
        severity: Severity::Critical,
        title: "Blacklist Function",
        description: "Contract can blacklist addresses from trading",
        points: 30,
    },
    RedFlagRule {
        detect: |src| PAUSE.is_match(src),
        severity: Severity::High,
        title: "Pausable Contract",
        description: "Trading can be paused by owner",
        points: 25,
    },
    RedFlagRule {
        detect: |src| PROXY.is_match(src),
        severity: Severity::High,
        title: "Proxy/Upgradeable Pattern",
        description: "Contract logic can be changed after deployment",
        points: 20,
    },
    RedFlagRule {
        detect: |src| first_number(&TAX, src).is_some_and(|tax| tax > TAX_THRESHOLD),
        severity: Severity::High,
        title: "High Transaction Tax",
        description: "Transaction tax may exceed 10%",
        points: 20,
    },
    RedFlagRule {
        detect: |src| SELF_DESTRUCT.is_match(src),
        severity: Severity::Critical,
        title: "Self-Destruct Function",
        description: "Contract can be destroyed, potentially locking funds",
        points: 30,
    },
];

/// First capture group of `pattern` as a number. Digit runs too long for a
/// `u64` saturate rather than vanish.
fn first_number(pattern: &Regex, source: &str) -> Option<u64> {
    let digits = pattern.captures(source)?.get(1)?.as_str();
    Some(digits.parse().unwrap_or(u64::MAX))
}

pub fn unverified_flag() -> ContractFlag {
    ContractFlag::new(
        Severity::High,
        "Unverified Contract",
        "Source code is not verified on blockchain explorer",
        25,
    )
}

/// Source red flags in rule order
pub fn detect_red_flags(source: &str) -> Vec<ContractFlag> {
    RED_FLAG_RULES
        .iter()
        .filter(|rule| (rule.detect)(source))
        .map(|rule| ContractFlag::new(rule.severity, rule.title, rule.description, rule.points))
        .collect()
}

/// Deployment-age flag, if the contract is young enough to warrant one
pub fn age_flag(age_days: u64) -> Option<ContractFlag> {
    match age_days {
        0 => Some(ContractFlag::new(
            Severity::High,
            "Brand New Contract",
            "Contract deployed today (less than 24 hours old)",
            20,
        )),
        1..=6 => Some(ContractFlag::new(
            Severity::Medium,
            "Very New Contract",
            format!(
                "Contract deployed {} day{} ago",
                age_days,
                if age_days == 1 { "" } else { "s" }
            ),
            15,
        )),
        7..=29 => Some(ContractFlag::new(
            Severity::Low,
            "Recently Deployed",
            format!("Contract is {} days old", age_days),
            5,
        )),
        _ => None,
    }
}

pub fn ownership_status(source: &str) -> OwnershipStatus {
    if RENOUNCED.is_match(source) {
        OwnershipStatus::Renounced
    } else if OWNER_FN.is_match(source) {
        OwnershipStatus::ActiveOwner
    } else {
        OwnershipStatus::NoOwnerFunction
    }
}

pub fn has_hidden_functions(source: &str) -> bool {
    HIDDEN.iter().any(|pattern| pattern.is_match(source))
}

pub fn tax_rate(source: &str) -> TaxRate {
    TaxRate {
        buy: first_number(&BUY_TAX, source).unwrap_or(0),
        sell: first_number(&SELL_TAX, source).unwrap_or(0),
    }
}

/// Sum of flag points, capped at 100
pub fn contract_score(flags: &[ContractFlag]) -> u8 {
    flags
        .iter()
        .map(|flag| u32::from(flag.points))
        .sum::<u32>()
        .min(100) as u8
}

/// Build the result from already fetched inputs
pub fn assess(
    source: Option<&str>,
    created_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> ContractRiskResult {
    let deployment_age_days = created_at.map_or(0, |ts| days_between(ts, now));

    let Some(source) = source.filter(|s| !s.is_empty()) else {
        let flags = vec![unverified_flag()];
        return ContractRiskResult {
            score: contract_score(&flags),
            flags,
            ownership_status: OwnershipStatus::Unknown,
            mintable: false,
            pausable: false,
            has_hidden_functions: false,
            tax_rate: TaxRate::default(),
            verified: false,
            deployment_age_days,
        };
    };

    let mut flags = detect_red_flags(source);
    if created_at.is_some() {
        flags.extend(age_flag(deployment_age_days));
    }

    ContractRiskResult {
        score: contract_score(&flags),
        flags,
        ownership_status: ownership_status(source),
        mintable: MINT.is_match(source),
        pausable: PAUSE.is_match(source),
        has_hidden_functions: has_hidden_functions(source),
        tax_rate: tax_rate(source),
        verified: true,
        deployment_age_days,
    }
}

/// Contract analyzer backed by the explorer
pub struct ContractAnalyzer {
    gateway: Arc<dyn ChainGateway>,
}

impl ContractAnalyzer {
    pub fn new(gateway: Arc<dyn ChainGateway>) -> Self {
        Self { gateway }
    }

    /// Verified source, v2 endpoint first, then the legacy one
    async fn fetch_source(&self, address: &str) -> Option<String> {
        match self.gateway.smart_contract(address).await {
            Ok(Some(contract)) if contract.source().is_some() => return contract.source_code,
            Ok(_) => {}
            Err(err) => warn!("contract: smart-contract lookup failed: {}", err),
        }

        or_empty(
            "contract",
            "legacy source",
            self.gateway.contract_source_legacy(address).await,
        )
    }

    /// Deployment time: oldest address transaction, then token `created_at`,
    /// then address `created_at`, then oldest token transfer.
    async fn creation_time(
        &self,
        address: &str,
        token: Option<&TokenInfo>,
        oldest_tx: Option<DateTime<Utc>>,
    ) -> Option<DateTime<Utc>> {
        if let Some(ts) = oldest_tx {
            debug!("contract: creation time from transactions: {}", ts);
            return Some(ts);
        }

        if let Some(ts) = token.and_then(TokenInfo::created_at) {
            debug!("contract: creation time from token info: {}", ts);
            return Some(ts);
        }

        let info = or_empty(
            "contract",
            "address info",
            self.gateway.address_info(address).await,
        );
        if let Some(ts) = info.as_ref().and_then(|i| i.created_at()) {
            debug!("contract: creation time from address info: {}", ts);
            return Some(ts);
        }

        let transfers = or_empty(
            "contract",
            "token transfers",
            self.gateway.token_transfers(address, None).await,
        );
        let oldest = transfers.iter().filter_map(|t| t.timestamp()).min();
        if oldest.is_none() {
            debug!("contract: could not determine creation time for {}", address);
        }
        oldest
    }
}

#[async_trait]
impl Analyzer for ContractAnalyzer {
    type Output = ContractRiskResult;

    fn name(&self) -> &'static str {
        "contract"
    }

    async fn analyze(&self, target: &ScanTarget) -> Result<ContractRiskResult, AnalyzerError> {
        let address = target.address();

        let (source, transactions, token) = tokio::join!(
            self.fetch_source(address),
            self.gateway.address_transactions(address, None),
            self.gateway.token_info(address),
        );

        let oldest_tx = or_empty("contract", "address transactions", transactions)
            .iter()
            .filter_map(|tx| tx.timestamp())
            .min();
        let token = or_empty("contract", "token info", token);

        let created_at = self.creation_time(address, token.as_ref(), oldest_tx).await;

        Ok(assess(source.as_deref(), created_at, target.now))
    }
}
