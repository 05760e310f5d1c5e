//! Scan API routes

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use scanner::{address::validate_address, TokenAnalysis};

use crate::{error::ApiError, AppState};

/// Query params for GET /api/scan
#[derive(Debug, Deserialize)]
pub struct ScanParams {
    pub address: Option<String>,
}

/// Body of POST /api/scan
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    pub token_address: Option<String>,
}

/// Cached analysis if fresh, otherwise a new scan stored in the cache
async fn scan_cached(state: &AppState, address: Option<String>) -> Result<TokenAnalysis, ApiError> {
    let address = address
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .ok_or(ApiError::MissingAddress)?;
    validate_address(&address)?;

    match state.cache.get(&address).await {
        Ok(Some(analysis)) => {
            tracing::debug!("Cache hit for {}", address);
            return Ok(analysis);
        }
        Ok(None) => {}
        Err(e) => tracing::warn!("Cache read failed for {}: {}", address, e),
    }

    let analysis = state.engine.scan(&address).await?;

    if let Err(e) = state.cache.put(&address, &analysis).await {
        tracing::warn!("Cache write failed for {}: {}", address, e);
    }

    Ok(analysis)
}

/// GET /api/scan?address=0x...
pub async fn get_scan(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ScanParams>,
) -> Result<Json<TokenAnalysis>, ApiError> {
    scan_cached(&state, params.address).await.map(Json)
}

/// POST /api/scan {"tokenAddress": "0x..."}
pub async fn post_scan(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ScanRequest>,
) -> Result<Json<TokenAnalysis>, ApiError> {
    scan_cached(&state, request.token_address).await.map(Json)
}
