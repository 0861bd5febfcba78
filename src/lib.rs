//! On-chain audit registry aggregation library.
//!
//! Retrieves smart-contract security audit records from registry contracts
//! deployed on one or more networks, tolerating unreliable RPC endpoints,
//! and merges everything into a single recency-ordered result set.

pub mod config;
pub mod fetcher;
pub mod observability;
pub mod registry;
pub mod resilience;

pub use config::schema::AggregatorConfig;
pub use fetcher::{aggregate_audits, fetch_network, FetchPolicy, FetchStatus, NetworkFetch};
pub use registry::types::{AuditRecord, Network, NetworkId, RegistryError};
