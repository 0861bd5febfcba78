//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Fetcher and config produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (attempt/failure/retry counters)
//!
//! Consumers:
//!     → stdout logs
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Structured events over free-form strings
//! - Metrics are cheap (atomic increments)
//! - The metrics endpoint is opt-in; the library never binds sockets

pub mod logging;
pub mod metrics;
