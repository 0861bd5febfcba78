//! Audit registry aggregator CLI.
//!
//! Loads the network configuration, fetches audit records from every
//! configured network with endpoint failover and retries, and prints the
//! merged, recency-ordered result.

use std::path::PathBuf;

use clap::Parser;

use audit_aggregator::config::loader::load_config;
use audit_aggregator::fetcher::{aggregate_audits, recent_window, FetchPolicy};
use audit_aggregator::observability;
use audit_aggregator::registry::client::RpcConnector;
use audit_aggregator::registry::types::Network;

#[derive(Parser)]
#[command(name = "audit-aggregator")]
#[command(about = "Aggregate on-chain smart-contract audit records", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "aggregator.toml")]
    config: PathBuf,

    /// Keep only records submitted by this address (case-insensitive).
    #[arg(long)]
    submitter: Option<String>,

    /// Keep only the most recent records (window size from config).
    #[arg(long)]
    recent: bool,

    /// Emit records as JSON instead of plain text.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Default-level logging comes up before the config loads so load
    // failures surface as structured events.
    let log_handle = observability::logging::init("info");

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(
                config_path = %cli.config.display(),
                error = %e,
                "failed to load configuration"
            );
            return Err(e.into());
        }
    };
    observability::logging::apply_config_level(&log_handle, &config.observability.log_level);

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => observability::metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "failed to parse metrics address"
            ),
        }
    }

    let mut networks = Vec::with_capacity(config.networks.len());
    for net in &config.networks {
        let parsed =
            Network::from_config(net).map_err(|e| format!("network '{}': {e}", net.id))?;
        networks.push(parsed);
    }

    tracing::info!(
        networks = networks.len(),
        max_retries = config.fetch.max_retries,
        "starting aggregation"
    );

    let connector = RpcConnector::new();
    let policy = FetchPolicy::from(&config.fetch);
    let mut records =
        aggregate_audits(&connector, &networks, &policy, cli.submitter.as_deref()).await;

    if cli.recent {
        recent_window(&mut records, config.fetch.recent_window);
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        for rec in &records {
            println!(
                "[{}] {} rating {}/5 by {} at {}: {}",
                rec.network, rec.fingerprint, rec.rating, rec.submitter, rec.timestamp, rec.summary
            );
        }
        println!("{} record(s)", records.len());
    }

    Ok(())
}
