//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events, format chosen by env mode)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (text or JSON)
//!     → Metrics endpoint (Prometheus scrape), when enabled
//! ```
//!
//! # Design Decisions
//! - Call sites attach `module` / `method` fields instead of holding a logger
//! - Request ID flows through the trace span of every request
//! - Metric updates are no-ops until an exporter is installed

pub mod logging;
pub mod metrics;
