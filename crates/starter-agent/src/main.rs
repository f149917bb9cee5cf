//! Run the starter agent against a transaction event file.
//!
//! ```text
//! starter-agent tx.json --config forta.config.json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use forta_agent::{Agent, FortaConfig, RuntimeEnv, TransactionEvent};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use starter_agent::TetherTransferAgent;

/// Report large Tether transfers in a transaction event.
#[derive(Parser, Debug)]
#[command(name = "starter-agent")]
struct Args {
    /// Transaction event JSON file
    event: PathBuf,

    /// Project config file (default: ./forta.config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let config = FortaConfig::load(args.config.as_deref()).context("loading forta config")?;
    let env = RuntimeEnv::from_env();
    debug!(
        json_rpc_url = %env.json_rpc_url(&config).context("resolving JSON-RPC URL")?,
        production = env.is_production(),
        "configuration loaded"
    );

    let raw = std::fs::read_to_string(&args.event)
        .with_context(|| format!("reading {}", args.event.display()))?;
    let event: TransactionEvent = serde_json::from_str(&raw)
        .with_context(|| format!("parsing transaction event {}", args.event.display()))?;

    let agent = TetherTransferAgent::new();
    agent.initialize().await?;
    let findings = agent.handle_transaction(&event).await?;
    info!(tx = event.hash(), findings = findings.len(), "handled transaction");

    println!("{}", serde_json::to_string_pretty(&findings)?);
    Ok(())
}
