//! Resilient multi-endpoint fetcher.
//!
//! # Data Flow
//! ```text
//! Network descriptor (ordered endpoints, registry address)
//!     → network.rs (retry rounds over endpoints, timeouts, chunked filter)
//!     → aggregate.rs (concatenate networks, sort by recency, recent window)
//! ```
//!
//! # Design Decisions
//! - Endpoints are tried strictly in descriptor order, never raced
//! - A bad network never blocks results from good networks (soft failure)
//! - Either a network yields a fully consistent batch or nothing

pub mod aggregate;
pub mod network;

pub use aggregate::{aggregate_audits, recent_window};
pub use network::{fetch_network, FetchPolicy, FetchStatus, NetworkFetch};
