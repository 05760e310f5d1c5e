//! Leaderboard API routes
//!
//! In-memory ranking of scanned tokens, split at the LOW risk threshold.

use std::{collections::HashMap, sync::Arc};

use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use scanner::address::validate_address;

use crate::{error::ApiError, AppState};

/// Entries shown per category
const TOP_N: usize = 10;
/// Highest score still listed as safe
const SAFE_MAX_SCORE: u8 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Safe,
    Danger,
}

impl Category {
    pub fn for_score(score: u8) -> Self {
        if score <= SAFE_MAX_SCORE {
            Category::Safe
        } else {
            Category::Danger
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub address: String,
    pub name: String,
    pub symbol: String,
    pub score: u8,
    pub scans: u32,
    pub timestamp: i64,
}

/// Leaderboard store keyed by category and lowercased address
#[derive(Default)]
pub struct Leaderboard {
    entries: RwLock<HashMap<(Category, String), LeaderboardEntry>>,
}

impl Leaderboard {
    pub async fn record(&self, address: &str, name: &str, symbol: &str, score: u8) -> LeaderboardEntry {
        let category = Category::for_score(score);
        let mut entries = self.entries.write().await;

        let key = (category, address.to_lowercase());
        let scans = entries.get(&key).map_or(1, |existing| existing.scans + 1);

        let entry = LeaderboardEntry {
            address: address.to_string(),
            name: name.to_string(),
            symbol: symbol.to_string(),
            score,
            scans,
            timestamp: Utc::now().timestamp_millis(),
        };
        entries.insert(key, entry.clone());
        entry
    }

    /// Lowest-scoring safe tokens and highest-scoring dangerous ones
    pub async fn standings(&self) -> LeaderboardResponse {
        let entries = self.entries.read().await;

        let mut safe: Vec<_> = entries
            .iter()
            .filter(|((category, _), _)| *category == Category::Safe)
            .map(|(_, entry)| entry.clone())
            .collect();
        let mut danger: Vec<_> = entries
            .iter()
            .filter(|((category, _), _)| *category == Category::Danger)
            .map(|(_, entry)| entry.clone())
            .collect();

        safe.sort_by(|a, b| a.score.cmp(&b.score).then_with(|| a.address.cmp(&b.address)));
        danger.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.address.cmp(&b.address)));
        safe.truncate(TOP_N);
        danger.truncate(TOP_N);

        LeaderboardResponse { safe, danger }
    }
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub safe: Vec<LeaderboardEntry>,
    pub danger: Vec<LeaderboardEntry>,
}

/// Body of POST /api/leaderboard
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardRequest {
    pub token_address: Option<String>,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub score: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct RecordResponse {
    pub success: bool,
    pub data: LeaderboardEntry,
}

/// Round a submitted score into 0..=100. Scores above 100 are capped;
/// negative or non-finite ones are rejected.
pub fn normalize_score(raw: f64) -> Result<u8, ApiError> {
    if !raw.is_finite() || raw < 0.0 {
        return Err(ApiError::InvalidScore);
    }

    Ok(raw.round().min(100.0) as u8)
}

/// GET /api/leaderboard
pub async fn get_leaderboard(State(state): State<Arc<AppState>>) -> Json<LeaderboardResponse> {
    Json(state.leaderboard.standings().await)
}

/// POST /api/leaderboard
pub async fn post_leaderboard(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LeaderboardRequest>,
) -> Result<Json<RecordResponse>, ApiError> {
    let (Some(address), Some(name), Some(symbol), Some(score)) = (
        request.token_address,
        request.name,
        request.symbol,
        request.score,
    ) else {
        return Err(ApiError::MissingFields);
    };
    validate_address(&address)?;
    let score = normalize_score(score)?;

    let entry = state
        .leaderboard
        .record(&address, &name, &symbol, score)
        .await;

    Ok(Json(RecordResponse {
        success: true,
        data: entry,
    }))
}
