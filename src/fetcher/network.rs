//! Per-network resilient fetch loop.
//!
//! # Responsibilities
//! - Try each endpoint in order with bounded timeouts
//! - Retry full rounds with exponential backoff
//! - Validate batch shape and process records in chunks
//! - Apply the optional submitter filter without reordering

use std::time::Duration;

use tokio::time::{sleep, timeout};
use url::Url;

use crate::config::schema::FetchConfig;
use crate::observability::metrics;
use crate::registry::client::{RegistryConnector, RegistryRead};
use crate::registry::types::{AuditRecord, Network, RegistryError, RegistryResult};
use crate::resilience::backoff::backoff_delay;

/// Tuning knobs for the fetch loop.
#[derive(Debug, Clone)]
pub struct FetchPolicy {
    pub max_retries: u32,
    pub count_timeout: Duration,
    pub batch_timeout: Duration,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    pub chunk_size: usize,
    pub chunk_pause: Duration,
}

impl From<&FetchConfig> for FetchPolicy {
    fn from(config: &FetchConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            count_timeout: Duration::from_secs(config.count_timeout_secs),
            batch_timeout: Duration::from_secs(config.batch_timeout_secs),
            base_delay_ms: config.base_delay_ms,
            max_delay_ms: config.max_delay_ms,
            chunk_size: config.chunk_size,
            chunk_pause: Duration::from_millis(config.chunk_pause_ms),
        }
    }
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self::from(&FetchConfig::default())
    }
}

/// Whether a network's contribution is a confirmed result or unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    /// One endpoint produced a consistent batch (possibly empty).
    Complete,
    /// Every endpoint failed across every retry round.
    Exhausted,
}

/// Result of fetching one network.
#[derive(Debug, Clone)]
pub struct NetworkFetch {
    pub records: Vec<AuditRecord>,
    pub status: FetchStatus,
}

/// Fetch all audit records for one network.
///
/// Never fails: an unreachable network yields an empty [`FetchStatus::Exhausted`]
/// result so the caller's aggregation is not blocked. Endpoints are tried
/// strictly in descriptor order; a round that fails on every endpoint is
/// followed by an exponentially growing delay.
pub async fn fetch_network<C: RegistryConnector>(
    connector: &C,
    network: &Network,
    policy: &FetchPolicy,
    submitter_filter: Option<&str>,
) -> NetworkFetch {
    for round in 1..=policy.max_retries {
        for (index, endpoint) in network.endpoints.iter().enumerate() {
            metrics::record_endpoint_attempt(&network.id.0);
            tracing::debug!(
                network = %network.id,
                endpoint = %endpoint,
                round,
                "querying registry endpoint"
            );

            match try_endpoint(connector, network, endpoint, policy, submitter_filter).await {
                Ok(records) => {
                    metrics::record_records_fetched(&network.id.0, records.len() as u64);
                    tracing::info!(
                        network = %network.id,
                        endpoint_idx = index,
                        round,
                        records = records.len(),
                        "registry fetch complete"
                    );
                    return NetworkFetch {
                        records,
                        status: FetchStatus::Complete,
                    };
                }
                Err(err) => {
                    metrics::record_endpoint_failure(&network.id.0, err.kind());
                    if err.is_transient() {
                        tracing::warn!(
                            network = %network.id,
                            endpoint_idx = index,
                            round,
                            error = %err,
                            "transient endpoint failure, trying next endpoint"
                        );
                    } else {
                        tracing::error!(
                            network = %network.id,
                            endpoint_idx = index,
                            round,
                            error = %err,
                            "endpoint rejected, trying next endpoint"
                        );
                    }
                }
            }
        }

        metrics::record_retry_round(&network.id.0);
        let delay = backoff_delay(round, policy.base_delay_ms, policy.max_delay_ms);
        tracing::debug!(
            network = %network.id,
            round,
            delay_ms = delay.as_millis() as u64,
            "round failed on every endpoint, backing off"
        );
        sleep(delay).await;
    }

    metrics::record_network_exhausted(&network.id.0);
    tracing::warn!(
        network = %network.id,
        retries = policy.max_retries,
        "all endpoints exhausted, network contributes no records"
    );
    NetworkFetch {
        records: Vec::new(),
        status: FetchStatus::Exhausted,
    }
}

/// One attempt against one endpoint: count, bulk fetch, validate, chunk.
async fn try_endpoint<C: RegistryConnector>(
    connector: &C,
    network: &Network,
    endpoint: &Url,
    policy: &FetchPolicy,
    submitter_filter: Option<&str>,
) -> RegistryResult<Vec<AuditRecord>> {
    let reader = connector.connect(endpoint, network.registry)?;

    // A misconfigured or lying endpoint must not contribute records
    // attributed to this network.
    let reported = timeout(policy.count_timeout, reader.chain_id())
        .await
        .map_err(|_| RegistryError::Timeout(policy.count_timeout.as_secs()))??;
    if reported != network.chain_id {
        return Err(RegistryError::ChainMismatch {
            expected: network.chain_id,
            actual: reported,
        });
    }

    let count = timeout(policy.count_timeout, reader.audit_count())
        .await
        .map_err(|_| RegistryError::Timeout(policy.count_timeout.as_secs()))??;

    if count == 0 {
        tracing::debug!(network = %network.id, "registry is empty");
        return Ok(Vec::new());
    }

    let batch = timeout(policy.batch_timeout, reader.audits_in_range(0, count))
        .await
        .map_err(|_| RegistryError::Timeout(policy.batch_timeout.as_secs()))??;

    let records = batch.into_records(&network.id)?;

    // Chunked pass keeps a long batch from hogging the task; the pause
    // yields to the runtime between chunks.
    let mut kept = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        if index > 0 && index % policy.chunk_size == 0 {
            sleep(policy.chunk_pause).await;
        }
        if matches_submitter(&record, submitter_filter) {
            kept.push(record);
        }
    }
    Ok(kept)
}

/// Case-insensitive submitter match; `None` keeps everything.
fn matches_submitter(record: &AuditRecord, filter: Option<&str>) -> bool {
    match filter {
        Some(submitter) => record.submitter.eq_ignore_ascii_case(submitter),
        None => true,
    }
}
