//! API route definitions

pub mod leaderboard;
pub mod scan;

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::AppState;

/// Create all API routes
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Scan routes
        .route("/scan", get(scan::get_scan).post(scan::post_scan))
        // Leaderboard routes
        .route(
            "/leaderboard",
            get(leaderboard::get_leaderboard).post(leaderboard::post_leaderboard),
        )
}
