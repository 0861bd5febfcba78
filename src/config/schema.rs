//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! aggregator. All types derive Serde traits for deserialization from
//! config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the audit aggregator.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Networks to aggregate audit records from, in iteration order.
    pub networks: Vec<NetworkConfig>,

    /// Fetch, retry, and chunking settings.
    pub fetch: FetchConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Static descriptor for one blockchain network.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworkConfig {
    /// Short network identifier used in logs and record attribution.
    pub id: String,

    /// Human-readable display name.
    pub name: String,

    /// Chain ID (e.g., 11155111 for Sepolia).
    pub chain_id: u64,

    /// Ordered JSON-RPC endpoint URLs. Tried strictly in this order.
    pub rpc_urls: Vec<String>,

    /// Address of the deployed audit registry contract.
    pub registry_address: String,

    /// Block explorer base URL.
    #[serde(default)]
    pub explorer_url: String,

    /// Icon asset path for UI consumers.
    #[serde(default)]
    pub icon: String,

    /// Native currency metadata.
    #[serde(default)]
    pub currency: CurrencyConfig,
}

/// Native currency metadata for a network.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CurrencyConfig {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            name: "Ether".to_string(),
            symbol: "ETH".to_string(),
            decimals: 18,
        }
    }
}

/// Fetch and retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Maximum number of full retry rounds over a network's endpoints.
    pub max_retries: u32,

    /// Timeout for the record count query in seconds.
    pub count_timeout_secs: u64,

    /// Timeout for the bulk record fetch in seconds.
    pub batch_timeout_secs: u64,

    /// Base delay for exponential backoff between rounds in milliseconds.
    pub base_delay_ms: u64,

    /// Maximum backoff delay in milliseconds.
    pub max_delay_ms: u64,

    /// Number of records processed per chunk.
    pub chunk_size: usize,

    /// Pause between chunks in milliseconds.
    pub chunk_pause_ms: u64,

    /// Number of records kept by the "recent" view.
    pub recent_window: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            count_timeout_secs: 10,
            batch_timeout_secs: 20,
            base_delay_ms: 2000,
            max_delay_ms: 30_000,
            chunk_size: 50,
            chunk_pause_ms: 10,
            recent_window: 5,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
