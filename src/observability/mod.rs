//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP layer and decode router produce:
//!     → logging.rs (structured log events, request IDs via tower-http spans)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every span
//! - The plate API key is never recorded

pub mod logging;
pub mod metrics;
