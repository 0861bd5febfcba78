//! Shared mock registry for integration tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, B256, U256};
use url::Url;

use audit_aggregator::registry::client::{RegistryConnector, RegistryRead};
use audit_aggregator::registry::types::{RawAuditBatch, RegistryError, RegistryResult};

/// Chain ID reported by well-behaved mock endpoints.
pub const DEV_CHAIN_ID: u64 = 31337;

/// One scripted record: (rating, summary, submitter, timestamp).
pub type Row = (u8, &'static str, &'static str, u64);

/// Scripted behavior for one mock endpoint.
#[derive(Debug, Clone)]
pub enum Script {
    /// Never answers; the fetcher's timeout must fire.
    Hang,
    /// Fails the count call with the given RPC error message.
    Fail(&'static str),
    /// Reports zero records.
    Empty,
    /// Returns the given records.
    Records(Vec<Row>),
    /// Returns a batch with one timestamp missing.
    Malformed(Vec<Row>),
    /// Reports a chain ID that does not match the descriptor.
    WrongChain,
}

/// Connector that serves scripts keyed by endpoint URL.
pub struct MockConnector {
    scripts: HashMap<String, Script>,
    attempts: Arc<Mutex<Vec<String>>>,
}

impl MockConnector {
    pub fn new(scripts: Vec<(&str, Script)>) -> Self {
        Self {
            scripts: scripts
                .into_iter()
                .map(|(url, script)| (url.parse::<Url>().unwrap().to_string(), script))
                .collect(),
            attempts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Endpoint URLs in the order they were contacted.
    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }
}

impl RegistryConnector for MockConnector {
    type Reader = MockReader;

    fn connect(&self, endpoint: &Url, _registry: Address) -> RegistryResult<Self::Reader> {
        let key = endpoint.to_string();
        self.attempts.lock().unwrap().push(key.clone());
        let script = self
            .scripts
            .get(&key)
            .cloned()
            .unwrap_or_else(|| panic!("unexpected endpoint contacted: {key}"));
        Ok(MockReader { script })
    }
}

pub struct MockReader {
    script: Script,
}

fn batch(rows: &[Row], drop_last_timestamp: bool) -> RawAuditBatch {
    let mut batch = RawAuditBatch::default();
    for (i, (rating, summary, submitter, timestamp)) in rows.iter().enumerate() {
        batch.hashes.push(B256::repeat_byte(i as u8 + 1));
        batch.ratings.push(*rating);
        batch.summaries.push((*summary).to_string());
        batch.auditors.push(submitter.parse().unwrap());
        batch.timestamps.push(U256::from(*timestamp));
    }
    if drop_last_timestamp {
        batch.timestamps.pop();
    }
    batch
}

impl RegistryRead for MockReader {
    async fn chain_id(&self) -> RegistryResult<u64> {
        match &self.script {
            Script::Hang => std::future::pending().await,
            Script::WrongChain => Ok(DEV_CHAIN_ID + 1),
            _ => Ok(DEV_CHAIN_ID),
        }
    }

    async fn audit_count(&self) -> RegistryResult<u64> {
        match &self.script {
            Script::Hang => std::future::pending().await,
            Script::Fail(msg) => Err(RegistryError::Rpc((*msg).to_string())),
            Script::Empty | Script::WrongChain => Ok(0),
            Script::Records(rows) | Script::Malformed(rows) => Ok(rows.len() as u64),
        }
    }

    async fn audits_in_range(&self, _offset: u64, _limit: u64) -> RegistryResult<RawAuditBatch> {
        match &self.script {
            Script::Hang => std::future::pending().await,
            Script::Fail(msg) => Err(RegistryError::Rpc((*msg).to_string())),
            Script::Empty | Script::WrongChain => Ok(RawAuditBatch::default()),
            Script::Records(rows) => Ok(batch(rows, false)),
            Script::Malformed(rows) => Ok(batch(rows, true)),
        }
    }
}
