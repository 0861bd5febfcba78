//! Metrics collection and exposition.
//!
//! # Metrics
//! - `aggregator_endpoint_attempts_total` (counter): attempts by network
//! - `aggregator_endpoint_failures_total` (counter): failures by network, kind
//! - `aggregator_retry_rounds_total` (counter): failed rounds by network
//! - `aggregator_networks_exhausted_total` (counter): networks dropped
//! - `aggregator_records_fetched_total` (counter): records by network

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus exposition endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "failed to start metrics endpoint"),
    }
}

/// One connection attempt against a registry endpoint.
pub fn record_endpoint_attempt(network: &str) {
    counter!("aggregator_endpoint_attempts_total", "network" => network.to_string()).increment(1);
}

/// One failed endpoint attempt, labeled by error kind.
pub fn record_endpoint_failure(network: &str, kind: &'static str) {
    counter!(
        "aggregator_endpoint_failures_total",
        "network" => network.to_string(),
        "kind" => kind
    )
    .increment(1);
}

/// A full round over a network's endpoints failed.
pub fn record_retry_round(network: &str) {
    counter!("aggregator_retry_rounds_total", "network" => network.to_string()).increment(1);
}

/// A network ran out of retries and was skipped.
pub fn record_network_exhausted(network: &str) {
    counter!("aggregator_networks_exhausted_total", "network" => network.to_string()).increment(1);
}

/// Records returned by a successful fetch.
pub fn record_records_fetched(network: &str, count: u64) {
    counter!("aggregator_records_fetched_total", "network" => network.to_string()).increment(count);
}
