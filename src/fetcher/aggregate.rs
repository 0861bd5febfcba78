//! Cross-network aggregation.

use crate::fetcher::network::{fetch_network, FetchPolicy, FetchStatus};
use crate::registry::client::RegistryConnector;
use crate::registry::types::{AuditRecord, Network};

/// Fetch every configured network sequentially and merge the results.
///
/// Networks are processed in descriptor order; a network that exhausts its
/// endpoints silently contributes nothing. The merged list is sorted by
/// descending timestamp; the sort is stable, so records sharing a timestamp
/// keep network order.
pub async fn aggregate_audits<C: RegistryConnector>(
    connector: &C,
    networks: &[Network],
    policy: &FetchPolicy,
    submitter_filter: Option<&str>,
) -> Vec<AuditRecord> {
    let mut merged = Vec::new();
    for network in networks {
        let fetch = fetch_network(connector, network, policy, submitter_filter).await;
        if fetch.status == FetchStatus::Exhausted {
            tracing::warn!(network = %network.id, "skipping unreachable network in aggregate");
        }
        merged.extend(fetch.records);
    }

    merged.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    merged
}

/// Truncate a sorted aggregate to the most recent `window` records.
pub fn recent_window(records: &mut Vec<AuditRecord>, window: usize) {
    records.truncate(window);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::types::NetworkId;

    fn record(timestamp: u64) -> AuditRecord {
        AuditRecord {
            fingerprint: format!("0x{timestamp:064x}"),
            rating: 3,
            summary: String::new(),
            submitter: "0xaa".to_string(),
            timestamp,
            network: NetworkId::from("testnet"),
        }
    }

    #[test]
    fn recent_window_truncates_in_place() {
        let mut records: Vec<_> = (0..8u64).rev().map(record).collect();
        recent_window(&mut records, 5);
        assert_eq!(records.len(), 5);
        assert_eq!(records[0].timestamp, 7);
        assert_eq!(records[4].timestamp, 3);
    }

    #[test]
    fn recent_window_keeps_short_lists_whole() {
        let mut records = vec![record(1)];
        recent_window(&mut records, 5);
        assert_eq!(records.len(), 1);
    }
}
