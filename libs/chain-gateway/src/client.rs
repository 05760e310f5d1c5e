use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::entity::{
    AddressInfo, AddressTransaction, HolderEntry, LegacyEnvelope, LegacySourceEntry,
    LegacyTokenInfo, Page, SmartContract, TokenInfo, TransferEntry, TxDirection,
};
use crate::error::GatewayError;

/// Read-only access to a block explorer.
///
/// Every lookup returns `Ok(None)` / an empty list when the explorer has
/// nothing for the address; `Err` is reserved for transport, status and
/// decoding failures.
#[async_trait]
pub trait ChainGateway: Send + Sync {
    async fn token_info(&self, address: &str) -> Result<Option<TokenInfo>, GatewayError>;

    async fn token_info_legacy(
        &self,
        address: &str,
    ) -> Result<Option<LegacyTokenInfo>, GatewayError>;

    async fn token_holders(
        &self,
        address: &str,
        limit: usize,
    ) -> Result<Vec<HolderEntry>, GatewayError>;

    async fn token_transfers(
        &self,
        address: &str,
        token_type: Option<&str>,
    ) -> Result<Vec<TransferEntry>, GatewayError>;

    async fn address_transactions(
        &self,
        address: &str,
        direction: Option<TxDirection>,
    ) -> Result<Vec<AddressTransaction>, GatewayError>;

    async fn address_info(&self, address: &str) -> Result<Option<AddressInfo>, GatewayError>;

    async fn smart_contract(&self, address: &str) -> Result<Option<SmartContract>, GatewayError>;

    async fn contract_source_legacy(&self, address: &str)
        -> Result<Option<String>, GatewayError>;
}

/// Blockscout HTTP client
#[derive(Debug, Clone)]
pub struct BlockscoutClient {
    http: Client,
    base_url: String,
    timeout: Duration,
    metadata_timeout: Duration,
}

impl BlockscoutClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        metadata_timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let http = Client::builder()
            .user_agent(concat!("token-risk-scanner/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            metadata_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `{base_url}{path}` and decode the body. 404 maps to `None`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        timeout: Duration,
    ) -> Result<Option<T>, GatewayError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self.http.get(&url).timeout(timeout).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(GatewayError::RateLimited);
        }
        if !status.is_success() {
            return Err(GatewayError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| GatewayError::Decode(format!("{}: {}", path, e)))
    }

    async fn get_page<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, GatewayError> {
        Ok(self
            .get_json::<Page<T>>(path, self.timeout)
            .await?
            .map(|page| page.items)
            .unwrap_or_default())
    }
}

#[async_trait]
impl ChainGateway for BlockscoutClient {
    async fn token_info(&self, address: &str) -> Result<Option<TokenInfo>, GatewayError> {
        let info: Option<TokenInfo> = self
            .get_json(&format!("/v2/tokens/{}", address), self.metadata_timeout)
            .await?;

        Ok(info.filter(|i| !i.is_empty()))
    }

    async fn token_info_legacy(
        &self,
        address: &str,
    ) -> Result<Option<LegacyTokenInfo>, GatewayError> {
        let envelope: Option<LegacyEnvelope> = self
            .get_json(
                &format!("?module=token&action=tokeninfo&contractaddress={}", address),
                self.metadata_timeout,
            )
            .await?;

        Ok(envelope
            .and_then(LegacyEnvelope::first::<LegacyTokenInfo>)
            .filter(|i| !i.is_empty()))
    }

    async fn token_holders(
        &self,
        address: &str,
        limit: usize,
    ) -> Result<Vec<HolderEntry>, GatewayError> {
        let mut holders: Vec<HolderEntry> = self
            .get_page(&format!(
                "/v2/tokens/{}/holders?page=1&limit={}",
                address, limit
            ))
            .await?;

        holders.truncate(limit);
        Ok(holders)
    }

    async fn token_transfers(
        &self,
        address: &str,
        token_type: Option<&str>,
    ) -> Result<Vec<TransferEntry>, GatewayError> {
        let path = match token_type {
            Some(kind) => format!("/v2/tokens/{}/transfers?type={}", address, kind),
            None => format!("/v2/tokens/{}/transfers", address),
        };

        self.get_page(&path).await
    }

    async fn address_transactions(
        &self,
        address: &str,
        direction: Option<TxDirection>,
    ) -> Result<Vec<AddressTransaction>, GatewayError> {
        let path = match direction {
            Some(dir) => format!(
                "/v2/addresses/{}/transactions?filter={}",
                address,
                dir.as_str()
            ),
            None => format!("/v2/addresses/{}/transactions", address),
        };

        self.get_page(&path).await
    }

    async fn address_info(&self, address: &str) -> Result<Option<AddressInfo>, GatewayError> {
        self.get_json(&format!("/v2/addresses/{}", address), self.timeout)
            .await
    }

    async fn smart_contract(&self, address: &str) -> Result<Option<SmartContract>, GatewayError> {
        self.get_json(&format!("/v2/smart-contracts/{}", address), self.timeout)
            .await
    }

    async fn contract_source_legacy(
        &self,
        address: &str,
    ) -> Result<Option<String>, GatewayError> {
        let envelope: Option<LegacyEnvelope> = self
            .get_json(
                &format!("?module=contract&action=getsourcecode&address={}", address),
                self.timeout,
            )
            .await?;

        Ok(envelope
            .and_then(LegacyEnvelope::first::<LegacySourceEntry>)
            .and_then(|entry| entry.source_code)
            .filter(|source| !source.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = BlockscoutClient::new(
            "https://explorer.example/api/",
            Duration::from_secs(10),
            Duration::from_secs(15),
        )
        .unwrap();

        assert_eq!(client.base_url(), "https://explorer.example/api");
    }
}
