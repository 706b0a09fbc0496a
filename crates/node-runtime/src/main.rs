//! # Federation-Chain Node
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (`RUST_LOG`, default `info`)
//! 2. Load configuration (`FC_CONFIG` file, then `FC_*` environment)
//! 3. Select chain parameters and initialize the genesis block
//! 4. Run until Ctrl+C

use anyhow::{Context, Result};
use node_runtime::{init_logging, load_config, NodeRuntime};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging("info")?;

    let config = load_config(|key| std::env::var(key).ok()).context("Failed to load configuration")?;

    let runtime = NodeRuntime::new(config);
    runtime.start()?;

    info!("Node is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;
    info!("Shutdown complete");

    Ok(())
}
