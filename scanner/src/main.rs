//! Scanner CLI
//!
//! Scans each address given on the command line and prints its analysis
//! as JSON. Logs go to stderr.

use std::{env, error::Error, process, sync::Arc};

use chain_gateway::initialize_gateway;
use scanner::{RiskEngine, ScanConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scanner=info,chain_gateway=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let addresses: Vec<String> = env::args().skip(1).collect();
    if addresses.is_empty() {
        eprintln!("usage: scanner <token-address>...");
        process::exit(2);
    }

    let gateway = Arc::new(initialize_gateway()?);
    tracing::info!("Using explorer at {}", gateway.base_url());

    let engine = RiskEngine::new(gateway, ScanConfig::from_env()?);

    for address in addresses {
        match engine.scan(&address).await {
            Ok(analysis) => println!("{}", serde_json::to_string_pretty(&analysis)?),
            Err(err) => eprintln!("{}", err),
        }
    }

    Ok(())
}
