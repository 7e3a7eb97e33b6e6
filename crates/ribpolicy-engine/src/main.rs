//! ribpolicy engine as a route-install filter.
//!
//! - Loads `ribpolicy.yaml` (or the path given as first argument)
//! - Installs the configured policy and sweeps it out once expired
//! - Reads one RouteEntry JSON per stdin line, writes the rewritten route to stdout

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{fmt, EnvFilter};

use ribpolicy_core::clock::MonotonicClock;
use ribpolicy_core::error::{Result, RibPolicyError};
use ribpolicy_core::route::RouteEntry;
use ribpolicy_engine::{config, spawn_expiry_sweeper, RibPolicyStore};

#[tokio::main]
async fn main() {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, code = e.code().as_str(), "ribpolicy-engine failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "ribpolicy.yaml".to_string());
    let cfg = config::load_from_file(&path)?;

    let store = Arc::new(RibPolicyStore::new(Arc::new(MonotonicClock)));
    config::install_startup_policy(&cfg, &store)?;
    let sweeper = spawn_expiry_sweeper(Arc::clone(&store), cfg.engine.sweep_interval());

    tracing::info!(config = %path, "ribpolicy-engine reading routes from stdin");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut out = tokio::io::stdout();
    while let Some(line) = lines.next_line().await.map_err(io_err)? {
        if line.trim().is_empty() {
            continue;
        }
        let mut route: RouteEntry = match serde_json::from_str(&line) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed route");
                continue;
            }
        };
        store.apply(&mut route)?;

        let mut encoded = serde_json::to_string(&route)
            .map_err(|e| RibPolicyError::Internal(format!("route serialization failed: {e}")))?;
        encoded.push('\n');
        out.write_all(encoded.as_bytes()).await.map_err(io_err)?;
    }
    out.flush().await.map_err(io_err)?;

    sweeper.abort();
    Ok(())
}

fn io_err(e: std::io::Error) -> RibPolicyError {
    RibPolicyError::Internal(format!("io: {e}"))
}
