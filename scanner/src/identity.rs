use chain_gateway::ChainGateway;
use tracing::{debug, warn};

use crate::models::TokenIdentity;

/// Resolve name, symbol and decimals. Falls back to the legacy endpoint,
/// then to the unknown identity; never fails.
pub async fn resolve_identity(gateway: &dyn ChainGateway, address: &str) -> TokenIdentity {
    match gateway.token_info(address).await {
        Ok(Some(info)) => {
            return TokenIdentity {
                address: address.to_string(),
                name: info.name.clone().unwrap_or_else(|| "Unknown Token".to_string()),
                symbol: info.symbol.clone().unwrap_or_else(|| "UNKNOWN".to_string()),
                decimals: info.decimals().unwrap_or(18),
            }
        }
        Ok(None) => debug!("No v2 token info for {}", address),
        Err(err) => warn!("Token info lookup failed for {}: {}", address, err),
    }

    match gateway.token_info_legacy(address).await {
        Ok(Some(info)) => TokenIdentity {
            address: address.to_string(),
            name: info.name().unwrap_or("Unknown Token").to_string(),
            symbol: info.symbol().unwrap_or("UNKNOWN").to_string(),
            decimals: info.decimals().unwrap_or(18),
        },
        Ok(None) => {
            debug!("No legacy token info for {}", address);
            TokenIdentity::unknown(address)
        }
        Err(err) => {
            warn!("Legacy token info lookup failed for {}: {}", address, err);
            TokenIdentity::unknown(address)
        }
    }
}
