//! Registry contract client over JSON-RPC.
//!
//! # Responsibilities
//! - Bind the audit registry contract on one endpoint
//! - Issue the two read calls (record count, bulk range fetch)
//! - Map provider errors into the registry error taxonomy
//!
//! Endpoint failover, retries, and timeouts live in the fetcher; one client
//! wraps exactly one endpoint.

use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::sol;
use url::Url;

use crate::registry::types::{RawAuditBatch, RegistryError, RegistryResult};

sol! {
    #[sol(rpc)]
    contract AuditRegistry {
        /// Total number of audit records persisted.
        function auditCount() external view returns (uint256);

        /// Records in [offset, offset + limit) as parallel arrays.
        function auditsInRange(uint256 offset, uint256 limit)
            external
            view
            returns (
                bytes32[] memory hashes,
                uint8[] memory ratings,
                string[] memory summaries,
                address[] memory auditors,
                uint256[] memory timestamps
            );
    }
}

/// Read access to one registry deployment through one endpoint.
#[allow(async_fn_in_trait)]
pub trait RegistryRead {
    /// Chain ID reported by the endpoint.
    async fn chain_id(&self) -> RegistryResult<u64>;

    /// Total number of records in the registry.
    async fn audit_count(&self) -> RegistryResult<u64>;

    /// Bulk fetch of `limit` records starting at `offset`.
    async fn audits_in_range(&self, offset: u64, limit: u64) -> RegistryResult<RawAuditBatch>;
}

/// Builds a [`RegistryRead`] for one endpoint of a network.
pub trait RegistryConnector {
    type Reader: RegistryRead;

    fn connect(&self, endpoint: &Url, registry: Address) -> RegistryResult<Self::Reader>;
}

/// Production connector backed by alloy HTTP providers.
#[derive(Debug, Clone, Default)]
pub struct RpcConnector;

impl RpcConnector {
    pub fn new() -> Self {
        Self
    }
}

impl RegistryConnector for RpcConnector {
    type Reader = RegistryClient;

    fn connect(&self, endpoint: &Url, registry: Address) -> RegistryResult<Self::Reader> {
        let provider = ProviderBuilder::new().connect_http(endpoint.clone()).erased();
        Ok(RegistryClient {
            contract: AuditRegistry::new(registry, provider),
        })
    }
}

/// Registry contract bound to a single RPC endpoint.
pub struct RegistryClient {
    contract: AuditRegistry::AuditRegistryInstance<DynProvider>,
}

impl RegistryRead for RegistryClient {
    async fn chain_id(&self) -> RegistryResult<u64> {
        self.contract
            .provider()
            .get_chain_id()
            .await
            .map_err(|e| RegistryError::Rpc(e.to_string()))
    }

    async fn audit_count(&self) -> RegistryResult<u64> {
        let count: U256 = self
            .contract
            .auditCount()
            .call()
            .await
            .map_err(|e| RegistryError::Rpc(e.to_string()))?;

        count
            .try_into()
            .map_err(|_| RegistryError::Format("audit count out of u64 range".to_string()))
    }

    async fn audits_in_range(&self, offset: u64, limit: u64) -> RegistryResult<RawAuditBatch> {
        let ret = self
            .contract
            .auditsInRange(U256::from(offset), U256::from(limit))
            .call()
            .await
            .map_err(|e| RegistryError::Rpc(e.to_string()))?;

        Ok(RawAuditBatch {
            hashes: ret.hashes,
            ratings: ret.ratings,
            summaries: ret.summaries,
            auditors: ret.auditors,
            timestamps: ret.timestamps,
        })
    }
}

impl std::fmt::Debug for RegistryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryClient")
            .field("registry", self.contract.address())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_builds_client_without_io() {
        let endpoint: Url = "http://localhost:8545".parse().unwrap();
        let connector = RpcConnector::new();
        assert!(connector.connect(&endpoint, Address::ZERO).is_ok());
    }
}
