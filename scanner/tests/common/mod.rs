#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use chain_gateway::{
    AddressInfo, AddressTransaction, ChainGateway, GatewayError, HolderEntry, LegacyTokenInfo,
    SmartContract, TokenInfo, TransferEntry, TxDirection,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

pub const TOKEN: &str = "0x765DE816845861e75A25fCA122bb6898B8B1282a";

pub fn decode<T: DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).unwrap()
}

/// In-memory explorer. Every call is counted; `failing` makes every call
/// return a 500.
#[derive(Default)]
pub struct StubGateway {
    pub token: Option<TokenInfo>,
    pub legacy_token: Option<LegacyTokenInfo>,
    pub holders: Vec<HolderEntry>,
    pub transfers: Vec<TransferEntry>,
    pub address_txs: HashMap<String, Vec<AddressTransaction>>,
    pub address_infos: HashMap<String, AddressInfo>,
    pub contract: Option<SmartContract>,
    pub legacy_source: Option<String>,
    pub failing: bool,
    pub calls: Arc<AtomicUsize>,
}

impl StubGateway {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) -> Result<(), GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            Err(GatewayError::Status(500))
        } else {
            Ok(())
        }
    }

    pub fn with_token(mut self, name: &str, symbol: &str, total_supply: &str) -> Self {
        self.token = Some(decode(json!({
            "address": TOKEN,
            "name": name,
            "symbol": symbol,
            "decimals": "18",
            "total_supply": total_supply,
            "holders": "3",
        })));
        self
    }

    pub fn with_holder(mut self, address: &str, value: &str, is_contract: bool) -> Self {
        self.holders.push(decode(json!({
            "address": { "hash": address, "is_contract": is_contract },
            "value": value,
        })));
        self
    }

    pub fn with_transfer(mut self, from: &str, to: &str, value: &str, timestamp: &str) -> Self {
        self.transfers.push(decode(json!({
            "tx_hash": format!("0x{:064x}", self.transfers.len()),
            "from": { "hash": from },
            "to": { "hash": to },
            "total": { "value": value, "decimals": "18" },
            "timestamp": timestamp,
        })));
        self
    }

    pub fn with_source(mut self, source: &str) -> Self {
        self.contract = Some(decode(json!({ "name": "Token", "source_code": source })));
        self
    }

    pub fn with_address_tx(mut self, address: &str, timestamp: &str) -> Self {
        self.address_txs
            .entry(address.to_string())
            .or_default()
            .push(decode(json!({ "hash": "0x01", "timestamp": timestamp })));
        self
    }
}

#[async_trait]
impl ChainGateway for StubGateway {
    async fn token_info(&self, _address: &str) -> Result<Option<TokenInfo>, GatewayError> {
        self.hit()?;
        Ok(self.token.clone())
    }

    async fn token_info_legacy(
        &self,
        _address: &str,
    ) -> Result<Option<LegacyTokenInfo>, GatewayError> {
        self.hit()?;
        Ok(self.legacy_token.clone())
    }

    async fn token_holders(
        &self,
        _address: &str,
        limit: usize,
    ) -> Result<Vec<HolderEntry>, GatewayError> {
        self.hit()?;
        Ok(self.holders.iter().take(limit).cloned().collect())
    }

    async fn token_transfers(
        &self,
        _address: &str,
        _token_type: Option<&str>,
    ) -> Result<Vec<TransferEntry>, GatewayError> {
        self.hit()?;
        Ok(self.transfers.clone())
    }

    async fn address_transactions(
        &self,
        address: &str,
        _direction: Option<TxDirection>,
    ) -> Result<Vec<AddressTransaction>, GatewayError> {
        self.hit()?;
        Ok(self.address_txs.get(address).cloned().unwrap_or_default())
    }

    async fn address_info(&self, address: &str) -> Result<Option<AddressInfo>, GatewayError> {
        self.hit()?;
        Ok(self.address_infos.get(address).cloned())
    }

    async fn smart_contract(&self, _address: &str) -> Result<Option<SmartContract>, GatewayError> {
        self.hit()?;
        Ok(self.contract.clone())
    }

    async fn contract_source_legacy(
        &self,
        _address: &str,
    ) -> Result<Option<String>, GatewayError> {
        self.hit()?;
        Ok(self.legacy_source.clone())
    }
}
