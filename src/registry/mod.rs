//! On-chain registry access subsystem.
//!
//! # Data Flow
//! ```text
//! NetworkConfig (endpoints, registry address)
//!     → types.rs (parsed immutable Network descriptor)
//!     → client.rs (RPC connection per endpoint, contract bindings)
//!     → types.rs (raw parallel arrays → validated AuditRecords)
//! ```
//!
//! # Design Decisions
//! - One client per endpoint; failover and retries are the fetcher's job
//! - Read-only: records come from the chain and are never mutated locally
//! - Every RPC call is bounded by a deadline enforced in the fetcher

pub mod client;
pub mod types;

pub use client::{RegistryConnector, RegistryRead, RpcConnector};
pub use types::{AuditRecord, Network, NetworkId, RawAuditBatch, RegistryError, RegistryResult};
