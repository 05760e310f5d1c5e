//! Holder concentration and whale behavior
//!
//! Percentages are relative to the observed holder set (sum of the fetched
//! balances), not to the declared supply. The declared supply is only used
//! to size "large" transfers.

use std::{collections::HashMap, sync::Arc};

use alloy::primitives::U256;
use async_trait::async_trait;
use chain_gateway::{ChainGateway, TransferEntry, TxDirection};
use chrono::{DateTime, Utc};
use futures::future::join_all;

use super::{days_between, or_empty, Analyzer, ScanTarget};
use crate::{
    error::AnalyzerError,
    models::{
        SuspiciousWallet, TokenHolder, Transaction, TransactionKind, WalletRisk,
        WhaleActivityResult,
    },
    units::{parse_raw, pow10, u256_to_f64},
};

/// Holders requested from the explorer
pub const HOLDER_FETCH_LIMIT: usize = 50;
/// Holders individually profiled (percentage and wallet age)
pub const PROFILED_HOLDERS: usize = 20;
/// Transfers considered for clustering and large-transaction checks
pub const TRANSFER_LIMIT: usize = 100;
/// Window size for coordinated-activity detection, in seconds
pub const CLUSTER_WINDOW_SECS: i64 = 300;
/// Transfers in one window that count as a cluster
pub const CLUSTER_MIN_SIZE: usize = 5;
/// Maximum large transactions reported
pub const LARGE_TX_LIMIT: usize = 20;

/// Supply assumed when the token does not declare one (10^24 raw units)
pub fn fallback_supply() -> U256 {
    pow10(24)
}

fn is_new_whale(holder: &TokenHolder) -> bool {
    holder.age_days < 7 && holder.percentage > 5.0
}

/// The 10 largest holders by percentage
pub fn top_holders(holders: &[TokenHolder]) -> Vec<TokenHolder> {
    let mut sorted = holders.to_vec();
    sorted.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
    sorted.truncate(10);
    sorted
}

/// Sum of the given percentages, rounded to 2 decimals
pub fn concentration(top: &[TokenHolder]) -> f64 {
    let sum: f64 = top.iter().map(|h| h.percentage).sum();
    (sum * 100.0).round() / 100.0
}

pub fn detect_suspicious_wallets(
    holders: &[TokenHolder],
    transactions: &[Transaction],
    now: DateTime<Utc>,
) -> Vec<SuspiciousWallet> {
    let now_secs = now.timestamp();

    holders
        .iter()
        .filter_map(|holder| {
            let mut reasons = Vec::new();
            let mut risk = WalletRisk::Low;

            if is_new_whale(holder) {
                reasons.push(format!(
                    "New wallet (<7 days) holding {:.2}% of supply",
                    holder.percentage
                ));
                risk = risk.max(WalletRisk::High);
            }

            if holder.percentage > 20.0 {
                reasons.push(format!(
                    "Controls {:.2}% of total supply",
                    holder.percentage
                ));
                risk = risk.max(if holder.percentage > 30.0 {
                    WalletRisk::High
                } else {
                    WalletRisk::Medium
                });
            }

            if holder.is_contract && holder.percentage > 10.0 {
                reasons.push("Contract address holding significant supply".to_string());
                risk = risk.max(WalletRisk::Medium);
            }

            let recent_related = transactions
                .iter()
                .filter(|tx| {
                    tx.from.eq_ignore_ascii_case(&holder.address)
                        || tx.to.eq_ignore_ascii_case(&holder.address)
                })
                .filter(|tx| now_secs - tx.timestamp < 3600)
                .count();
            if recent_related > 10 {
                reasons.push("High transaction frequency in last hour".to_string());
                risk = risk.max(WalletRisk::High);
            }

            (!reasons.is_empty()).then(|| SuspiciousWallet {
                address: holder.address.clone(),
                reasons,
                risk_level: risk,
            })
        })
        .collect()
}

/// True when any 5-minute window holds at least 5 transfers
pub fn detect_clustering(transactions: &[Transaction]) -> bool {
    let mut windows: HashMap<i64, usize> = HashMap::new();

    for tx in transactions {
        let count = windows
            .entry(tx.timestamp.div_euclid(CLUSTER_WINDOW_SECS))
            .or_default();
        *count += 1;
        if *count >= CLUSTER_MIN_SIZE {
            return true;
        }
    }

    false
}

/// Transfers moving more than 0.5% of `supply`, first 20
pub fn large_transactions(transactions: &[Transaction], supply: U256) -> Vec<Transaction> {
    // amount / supply > 0.5%  <=>  amount * 200 > supply
    let factor = U256::from(200u64);

    transactions
        .iter()
        .filter(|tx| parse_raw(&tx.amount_raw).saturating_mul(factor) > supply)
        .take(LARGE_TX_LIMIT)
        .cloned()
        .collect()
}

pub fn whale_score(
    concentration: f64,
    suspicious_count: usize,
    clustering: bool,
    holders: &[TokenHolder],
) -> u8 {
    let mut score: u32 = match concentration {
        c if c > 80.0 => 40,
        c if c > 60.0 => 30,
        c if c > 40.0 => 20,
        c if c > 20.0 => 10,
        _ => 0,
    };

    score += (suspicious_count as u32 * 8).min(30);

    if clustering {
        score += 15;
    }

    let new_whales = holders.iter().filter(|h| is_new_whale(h)).count() as u32;
    score += (new_whales * 10).min(20);

    score.min(100) as u8
}

/// Map explorer transfers to transactions; missing timestamps take `now`
pub fn to_transactions(entries: &[TransferEntry], now: DateTime<Utc>) -> Vec<Transaction> {
    entries
        .iter()
        .take(TRANSFER_LIMIT)
        .map(|entry| Transaction {
            hash: entry.tx_hash.clone().unwrap_or_default(),
            from: entry.from_hash().unwrap_or_default().to_string(),
            to: entry.to_hash().unwrap_or_default().to_string(),
            amount_raw: entry.value().to_string(),
            timestamp: entry.timestamp().unwrap_or(now).timestamp(),
            kind: TransactionKind::Transfer,
        })
        .collect()
}

/// Whale analyzer backed by the explorer
pub struct WhaleAnalyzer {
    gateway: Arc<dyn ChainGateway>,
}

impl WhaleAnalyzer {
    pub fn new(gateway: Arc<dyn ChainGateway>) -> Self {
        Self { gateway }
    }

    /// Days since the oldest inbound transaction, 0 when unknown
    async fn wallet_age(&self, address: &str, now: DateTime<Utc>) -> u64 {
        match self
            .gateway
            .address_transactions(address, Some(TxDirection::To))
            .await
        {
            Ok(txs) => txs
                .last()
                .and_then(|tx| tx.timestamp())
                .map_or(0, |ts| days_between(ts, now)),
            Err(_) => 0,
        }
    }

    async fn profiled_holders(&self, address: &str, now: DateTime<Utc>) -> Vec<TokenHolder> {
        let entries = or_empty(
            "whale",
            "holders",
            self.gateway.token_holders(address, HOLDER_FETCH_LIMIT).await,
        );
        let entries: Vec<_> = entries.into_iter().filter(|e| e.hash().is_some()).collect();

        let holder_set_supply = entries
            .iter()
            .fold(U256::ZERO, |sum, e| sum.saturating_add(parse_raw(e.value())));
        let supply = u256_to_f64(holder_set_supply);

        let profiled = entries.iter().take(PROFILED_HOLDERS);
        let ages = join_all(
            profiled
                .clone()
                .map(|e| self.wallet_age(e.hash().unwrap_or_default(), now)),
        )
        .await;

        profiled
            .zip(ages)
            .map(|(entry, age_days)| {
                let balance = u256_to_f64(parse_raw(entry.value()));
                TokenHolder {
                    address: entry.hash().unwrap_or_default().to_string(),
                    balance_raw: entry.value().to_string(),
                    percentage: if supply > 0.0 {
                        balance / supply * 100.0
                    } else {
                        0.0
                    },
                    age_days,
                    is_contract: entry.is_contract(),
                }
            })
            .collect()
    }

    async fn declared_supply(&self, address: &str) -> U256 {
        or_empty("whale", "token info", self.gateway.token_info(address).await)
            .and_then(|info| info.total_supply)
            .map(|raw| parse_raw(&raw))
            .filter(|supply| !supply.is_zero())
            .unwrap_or_else(fallback_supply)
    }
}

#[async_trait]
impl Analyzer for WhaleAnalyzer {
    type Output = WhaleActivityResult;

    fn name(&self) -> &'static str {
        "whale"
    }

    async fn analyze(&self, target: &ScanTarget) -> Result<WhaleActivityResult, AnalyzerError> {
        let address = target.address();

        let (holders, transfers, supply) = tokio::join!(
            self.profiled_holders(address, target.now),
            self.gateway.token_transfers(address, Some("ERC-20")),
            self.declared_supply(address),
        );
        let transactions = to_transactions(
            &or_empty("whale", "transfers", transfers),
            target.now,
        );

        let top = top_holders(&holders);
        let concentration = concentration(&top);
        let suspicious_wallets = detect_suspicious_wallets(&holders, &transactions, target.now);
        let clustering_detected = detect_clustering(&transactions);

        Ok(WhaleActivityResult {
            score: whale_score(
                concentration,
                suspicious_wallets.len(),
                clustering_detected,
                &holders,
            ),
            top_holders: top,
            concentration_pct: concentration,
            suspicious_wallets,
            recent_large_transactions: large_transactions(&transactions, supply),
            clustering_detected,
        })
    }
}
