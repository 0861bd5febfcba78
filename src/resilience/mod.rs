//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Fetch round fails on every endpoint:
//!     → backoff.rs (delay before the next round grows exponentially)
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every RPC call has a deadline
//! - Backoff is deterministic so the worst-case wait stays bounded
//! - Per-endpoint failures never abort the aggregation

pub mod backoff;

pub use backoff::backoff_delay;
