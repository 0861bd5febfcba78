//! Registry record types and error definitions.

use alloy::primitives::{Address, B256, U256};
use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::config::schema::NetworkConfig;

/// Network identifier used for record attribution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NetworkId(pub String);

impl std::fmt::Display for NetworkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NetworkId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Parsed, immutable descriptor for one network.
///
/// Built once from configuration at startup; the fetcher only ever reads it.
#[derive(Debug, Clone)]
pub struct Network {
    pub id: NetworkId,
    pub name: String,
    /// Chain ID the endpoints are expected to serve.
    pub chain_id: u64,
    /// Endpoints in the order they are tried.
    pub endpoints: Vec<Url>,
    /// Deployed audit registry contract.
    pub registry: Address,
}

impl Network {
    /// Parse a network descriptor out of its raw configuration.
    pub fn from_config(config: &NetworkConfig) -> Result<Self, String> {
        if config.rpc_urls.is_empty() {
            return Err("no RPC endpoints configured".to_string());
        }

        let mut endpoints = Vec::with_capacity(config.rpc_urls.len());
        for raw in &config.rpc_urls {
            let url = raw
                .parse::<Url>()
                .map_err(|e| format!("invalid RPC URL '{raw}': {e}"))?;
            endpoints.push(url);
        }

        let registry: Address = config.registry_address.parse().map_err(|e| {
            format!(
                "invalid registry address '{}': {e}",
                config.registry_address
            )
        })?;

        Ok(Self {
            id: NetworkId(config.id.clone()),
            name: config.name.clone(),
            chain_id: config.chain_id,
            endpoints,
            registry,
        })
    }
}

/// One persisted security-rating entry from a registry contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditRecord {
    /// Content fingerprint of the audited contract source.
    pub fingerprint: String,

    /// Star rating, 0 to 5.
    pub rating: u8,

    /// Free-text summary of the findings.
    pub summary: String,

    /// Address of the submitter.
    pub submitter: String,

    /// Creation timestamp in seconds.
    pub timestamp: u64,

    /// Network the record was read from. Fingerprints are not globally
    /// unique across networks, so attribution travels with the record.
    pub network: NetworkId,
}

/// Raw bulk-fetch response: five parallel arrays as returned on-chain.
#[derive(Debug, Clone, Default)]
pub struct RawAuditBatch {
    pub hashes: Vec<B256>,
    pub ratings: Vec<u8>,
    pub summaries: Vec<String>,
    pub auditors: Vec<Address>,
    pub timestamps: Vec<U256>,
}

impl RawAuditBatch {
    /// Validate the parallel-array shape and convert into attributed records.
    ///
    /// Rejects the whole batch on any length mismatch: a network yields a
    /// fully consistent batch or nothing.
    pub fn into_records(self, network: &NetworkId) -> RegistryResult<Vec<AuditRecord>> {
        let len = self.hashes.len();
        if self.ratings.len() != len
            || self.summaries.len() != len
            || self.auditors.len() != len
            || self.timestamps.len() != len
        {
            return Err(RegistryError::Format(format!(
                "parallel array length mismatch: hashes={} ratings={} summaries={} auditors={} timestamps={}",
                len,
                self.ratings.len(),
                self.summaries.len(),
                self.auditors.len(),
                self.timestamps.len()
            )));
        }

        let rows = self
            .hashes
            .into_iter()
            .zip(self.ratings)
            .zip(self.summaries)
            .zip(self.auditors)
            .zip(self.timestamps);

        let mut records = Vec::with_capacity(len);
        for ((((hash, rating), summary), auditor), raw_ts) in rows {
            let timestamp = u64::try_from(raw_ts)
                .map_err(|_| RegistryError::Format("timestamp out of u64 range".to_string()))?;
            records.push(AuditRecord {
                fingerprint: hash.to_string(),
                rating,
                summary,
                submitter: auditor.to_string(),
                timestamp,
                network: network.clone(),
            });
        }
        Ok(records)
    }
}

/// Errors that can occur while reading a registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Response did not match the expected shape.
    #[error("malformed response: {0}")]
    Format(String),

    /// Endpoint serves a different chain than the descriptor claims.
    #[error("chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },

    /// Endpoint or contract address could not be used.
    #[error("configuration error: {0}")]
    Config(String),
}

impl RegistryError {
    /// Whether the error is transient transport trouble.
    ///
    /// Classified by status code or message pattern, matching the error
    /// strings upstream providers actually emit.
    pub fn is_transient(&self) -> bool {
        match self {
            RegistryError::Timeout(_) => true,
            RegistryError::Rpc(msg) => {
                let msg = msg.to_ascii_lowercase();
                msg.contains("503")
                    || msg.contains("502")
                    || msg.contains("timeout")
                    || msg.contains("timed out")
                    || msg.contains("network error")
                    || msg.contains("connection")
            }
            RegistryError::Format(_)
            | RegistryError::ChainMismatch { .. }
            | RegistryError::Config(_) => false,
        }
    }

    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            RegistryError::Timeout(_) => "timeout",
            RegistryError::Rpc(_) => "rpc",
            RegistryError::Format(_) => "format",
            RegistryError::ChainMismatch { .. } => "chain_mismatch",
            RegistryError::Config(_) => "config",
        }
    }
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(len: usize) -> RawAuditBatch {
        let mut batch = RawAuditBatch::default();
        for i in 0..len {
            batch.hashes.push(B256::repeat_byte(i as u8 + 1));
            batch.ratings.push(3);
            batch.summaries.push(format!("summary {i}"));
            batch.auditors.push(Address::repeat_byte(0xaa));
            batch.timestamps.push(U256::from(1_700_000_000u64 + i as u64));
        }
        batch
    }

    #[test]
    fn mismatched_arrays_are_rejected() {
        let mut bad = batch(3);
        bad.timestamps.pop();
        let err = bad.into_records(&NetworkId::from("testnet")).unwrap_err();
        assert!(matches!(err, RegistryError::Format(_)));
        assert!(!err.is_transient());
    }

    #[test]
    fn records_carry_network_attribution() {
        let records = batch(2).into_records(&NetworkId::from("testnet")).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.network == NetworkId::from("testnet")));
        assert_eq!(records[0].summary, "summary 0");
        assert_eq!(records[1].timestamp, 1_700_000_001);
    }

    #[test]
    fn oversized_timestamp_is_a_format_error() {
        let mut bad = batch(1);
        bad.timestamps[0] = U256::MAX;
        let err = bad.into_records(&NetworkId::from("testnet")).unwrap_err();
        assert!(matches!(err, RegistryError::Format(_)));
    }

    #[test]
    fn transient_classification_follows_message_patterns() {
        assert!(RegistryError::Timeout(10).is_transient());
        assert!(RegistryError::Rpc("server returned 503".to_string()).is_transient());
        assert!(RegistryError::Rpc("request timed out".to_string()).is_transient());
        assert!(RegistryError::Rpc("network error".to_string()).is_transient());
        assert!(!RegistryError::Rpc("execution reverted".to_string()).is_transient());
        assert!(!RegistryError::Format("bad shape".to_string()).is_transient());
        assert!(!RegistryError::ChainMismatch {
            expected: 11155111,
            actual: 1
        }
        .is_transient());
    }

    #[test]
    fn from_config_requires_endpoints_and_valid_address() {
        let mut config = crate::config::schema::NetworkConfig {
            id: "sepolia".to_string(),
            name: "Sepolia".to_string(),
            chain_id: 11155111,
            rpc_urls: Vec::new(),
            registry_address: "0x0000000000000000000000000000000000000001".to_string(),
            explorer_url: String::new(),
            icon: String::new(),
            currency: Default::default(),
        };
        assert!(Network::from_config(&config).is_err());

        config.rpc_urls.push("https://rpc.example.org".to_string());
        assert!(Network::from_config(&config).is_ok());

        config.registry_address = "nope".to_string();
        assert!(Network::from_config(&config)
            .unwrap_err()
            .contains("invalid registry address"));
    }
}
