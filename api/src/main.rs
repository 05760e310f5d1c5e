//! Token Risk Scanner API Server
//!
//! REST front door for the risk engine: scans with a result cache, plus the
//! safe/danger leaderboard.

use std::{env, net::SocketAddr, sync::Arc, time::Duration};

use axum::{routing::get, Router};
use scanner::{RiskEngine, ScanConfig};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cache;
mod error;
mod routes;

use cache::ScanCache;
use routes::leaderboard::Leaderboard;

/// Application state shared across handlers
pub struct AppState {
    pub engine: RiskEngine,
    pub cache: Arc<dyn ScanCache>,
    pub leaderboard: Leaderboard,
}

mod defaults {
    pub const API_PORT: &str = "8080";
    pub const API_HOST: &str = "0.0.0.0";
    pub const SCAN_CACHE_TTL_SECS: &str = "300";
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Root endpoint with API info
        .route("/", get(root))
        // Health check
        .route("/health", get(health_check))
        // API routes
        .nest("/api", routes::api_routes())
        // State and middleware
        .with_state(state)
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Token Risk Scanner API Server...");

    // Explorer client
    let gateway = Arc::new(chain_gateway::initialize_gateway()?);
    tracing::info!("Using explorer at {}", gateway.base_url());

    let engine = RiskEngine::new(gateway, ScanConfig::from_env()?);

    let ttl_secs = env::var("SCAN_CACHE_TTL_SECS")
        .unwrap_or_else(|_| defaults::SCAN_CACHE_TTL_SECS.to_string())
        .parse::<u64>()?;
    let cache = cache::connect(Duration::from_secs(ttl_secs)).await?;

    // Create app state
    let state = Arc::new(AppState {
        engine,
        cache,
        leaderboard: Leaderboard::default(),
    });

    let app = router(state);

    // Get port from environment
    let port = env::var("API_PORT")
        .unwrap_or_else(|_| defaults::API_PORT.to_string())
        .parse::<u16>()
        .unwrap_or(8080);

    let host = env::var("API_HOST").unwrap_or_else(|_| defaults::API_HOST.to_string());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Root endpoint - API information
async fn root() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "token-risk-scanner",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "GET /health",
            "GET /api/scan?address=0x...",
            "POST /api/scan",
            "GET /api/leaderboard",
            "POST /api/leaderboard",
        ],
    }))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use chain_gateway::{
        AddressInfo, AddressTransaction, ChainGateway, GatewayError, HolderEntry,
        LegacyTokenInfo, SmartContract, TokenInfo, TransferEntry, TxDirection,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::cache::MemoryScanCache;

    const TOKEN: &str = "0x765DE816845861e75A25fCA122bb6898B8B1282a";

    /// Explorer with no data, counting calls
    #[derive(Default)]
    struct EmptyGateway {
        calls: AtomicUsize,
    }

    impl EmptyGateway {
        fn hit(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl ChainGateway for EmptyGateway {
        async fn token_info(&self, _: &str) -> Result<Option<TokenInfo>, GatewayError> {
            self.hit();
            Ok(None)
        }

        async fn token_info_legacy(&self, _: &str) -> Result<Option<LegacyTokenInfo>, GatewayError> {
            self.hit();
            Ok(None)
        }

        async fn token_holders(&self, _: &str, _: usize) -> Result<Vec<HolderEntry>, GatewayError> {
            self.hit();
            Ok(Vec::new())
        }

        async fn token_transfers(
            &self,
            _: &str,
            _: Option<&str>,
        ) -> Result<Vec<TransferEntry>, GatewayError> {
            self.hit();
            Ok(Vec::new())
        }

        async fn address_transactions(
            &self,
            _: &str,
            _: Option<TxDirection>,
        ) -> Result<Vec<AddressTransaction>, GatewayError> {
            self.hit();
            Ok(Vec::new())
        }

        async fn address_info(&self, _: &str) -> Result<Option<AddressInfo>, GatewayError> {
            self.hit();
            Ok(None)
        }

        async fn smart_contract(&self, _: &str) -> Result<Option<SmartContract>, GatewayError> {
            self.hit();
            Ok(None)
        }

        async fn contract_source_legacy(&self, _: &str) -> Result<Option<String>, GatewayError> {
            self.hit();
            Ok(None)
        }
    }

    fn app() -> (Router, Arc<EmptyGateway>) {
        let gateway = Arc::new(EmptyGateway::default());
        let shared: Arc<dyn ChainGateway> = gateway.clone();

        let state = Arc::new(AppState {
            engine: RiskEngine::new(shared, ScanConfig::default()),
            cache: Arc::new(MemoryScanCache::new(Duration::from_secs(300))),
            leaderboard: Leaderboard::default(),
        });

        (router(state), gateway)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = app();

        let response = app.oneshot(get_req("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"OK");
    }

    #[tokio::test]
    async fn test_root_lists_endpoints() {
        let (app, _) = app();

        let (status, body) = send(&app, get_req("/")).await;

        assert_eq!(status, StatusCode::OK);
        let endpoints = body["endpoints"].as_array().unwrap();
        assert!(endpoints.iter().any(|e| e == "POST /api/scan"));
        assert!(endpoints.iter().any(|e| e == "GET /api/leaderboard"));
    }

    #[tokio::test]
    async fn test_scan_requires_address() {
        let (app, gateway) = app();

        let (status, body) = send(&app, get_req("/api/scan")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Token address is required");
        assert_eq!(body["code"], 400);

        let (status, _) = send(&app, post("/api/scan", json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_scan_rejects_invalid_address() {
        let (app, gateway) = app();

        let (status, body) = send(&app, get_req("/api/scan?address=0x1234")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 400);
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_scan_is_cached() {
        let (app, gateway) = app();

        let (status, first) = send(&app, post("/api/scan", json!({ "tokenAddress": TOKEN }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["address"], TOKEN);
        assert_eq!(first["name"], "Unknown Token");
        assert_eq!(first["contractRisk"]["verified"], false);
        assert!(first["totalScore"].as_u64().unwrap() <= 100);

        let calls = gateway.calls.load(Ordering::SeqCst);
        assert!(calls > 0);

        let uri = format!("/api/scan?address={}", TOKEN);
        let (status, second) = send(&app, get_req(&uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(second, first);
        assert_eq!(gateway.calls.load(Ordering::SeqCst), calls);
    }

    #[tokio::test]
    async fn test_leaderboard_roundtrip() {
        let (app, _) = app();

        let (status, body) = send(&app, post("/api/leaderboard", json!({ "tokenAddress": TOKEN }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing required fields");

        let entry = json!({ "tokenAddress": TOKEN, "name": "Celo Dollar", "symbol": "cUSD", "score": 12 });
        send(&app, post("/api/leaderboard", entry.clone())).await;
        let (status, body) = send(&app, post("/api/leaderboard", entry)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["scans"], 2);

        let (status, board) = send(&app, get_req("/api/leaderboard")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(board["safe"][0]["symbol"], "cUSD");
        assert_eq!(board["danger"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_leaderboard_score_out_of_range() {
        let (app, _) = app();

        let negative = json!({ "tokenAddress": TOKEN, "name": "T", "symbol": "T", "score": -5 });
        let (status, body) = send(&app, post("/api/leaderboard", negative)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 400);
        assert_eq!(body["error"], "Score must be a number between 0 and 100");

        let huge = json!({ "tokenAddress": TOKEN, "name": "T", "symbol": "T", "score": 300 });
        let (status, body) = send(&app, post("/api/leaderboard", huge)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["score"], 100);
    }
}
