//! riak-exporter core: scrape data model, stats flattening, and the Prometheus
//! text exposition renderer.
//!
//! This crate carries no HTTP or runtime dependencies. The exporter binary
//! fetches `/ping` and `/stats` from a Riak node, hands the outcome over as a
//! [`ScrapeResult`], and renders the resulting [`MetricSnapshot`] with
//! [`exposition::render`].
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. A scrape must always
//! degrade into metric values, never abort the metrics response.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod exposition;
pub mod snapshot;

/// Shared result type.
pub use error::{ExporterError, Result};
pub use snapshot::{Gauge, MetricSnapshot, ScrapeResult};
