//! Riak collector: one ping, one stats fetch, one flatten per scrape.
//!
//! `scrape` never fails. Connectivity, protocol and payload errors are logged
//! and surface only as `riak_up` / `riak_exporter_last_scrape_error`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use reqwest::{Client, StatusCode};
use riak_exporter_core::error::{ExporterError, Result};
use riak_exporter_core::snapshot::parse_stats;
use riak_exporter_core::{MetricSnapshot, ScrapeResult};

use crate::config::RiakSection;

pub const NAMESPACE: &str = "riak";

const PING_PATH: &str = "/ping";
const STATS_PATH: &str = "/stats";

/// Where a scrape stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapeStage {
    Probing,
    Fetching,
    Flattening,
}

impl ScrapeStage {
    pub fn as_str(self) -> &'static str {
        match self {
            ScrapeStage::Probing => "probing",
            ScrapeStage::Fetching => "fetching",
            ScrapeStage::Flattening => "flattening",
        }
    }
}

pub struct Exporter {
    base_url: String,
    client: Client,
    scrapes_total: AtomicU64,
}

impl Exporter {
    pub fn new(cfg: &RiakSection) -> Result<Self> {
        let base_url = cfg.base_url()?;
        let client = Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .build()
            .map_err(|e| ExporterError::Internal(format!("http client build failed: {e}")))?;

        Ok(Self {
            base_url,
            client,
            scrapes_total: AtomicU64::new(0),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn scrapes_total(&self) -> u64 {
        self.scrapes_total.load(Ordering::Relaxed)
    }

    /// Run one scrape and return the snapshot to render.
    pub async fn scrape(&self) -> MetricSnapshot {
        let scrapes_total = self.scrapes_total.fetch_add(1, Ordering::Relaxed) + 1;
        let started = Instant::now();

        let mut result = ScrapeResult::default();
        if let Err((stage, e)) = self.collect(&mut result).await {
            tracing::error!(
                uri = %self.base_url,
                stage = stage.as_str(),
                kind = e.kind().as_str(),
                error = %e,
                "riak scrape failed"
            );
            result.errored = true;
        }
        result.duration_seconds = started.elapsed().as_secs_f64();

        tracing::debug!(
            uri = %self.base_url,
            up = ?result.up,
            stats = result.stats.len(),
            duration_seconds = result.duration_seconds,
            "riak scrape finished"
        );

        MetricSnapshot::from_result(
            NAMESPACE,
            &result,
            scrapes_total,
            env!("CARGO_PKG_VERSION"),
        )
    }

    async fn collect(
        &self,
        result: &mut ScrapeResult,
    ) -> std::result::Result<(), (ScrapeStage, ExporterError)> {
        let ping = self
            .get(PING_PATH)
            .await
            .map_err(|e| (ScrapeStage::Probing, e))?;
        let up = ping.status() == StatusCode::OK;
        result.up = Some(up);
        if !up {
            return Err((
                ScrapeStage::Probing,
                ExporterError::UnexpectedStatus {
                    endpoint: PING_PATH.into(),
                    status: ping.status().as_u16(),
                },
            ));
        }

        let stats = self
            .get(STATS_PATH)
            .await
            .map_err(|e| (ScrapeStage::Fetching, e))?;
        if stats.status() != StatusCode::OK {
            return Err((
                ScrapeStage::Fetching,
                ExporterError::UnexpectedStatus {
                    endpoint: STATS_PATH.into(),
                    status: stats.status().as_u16(),
                },
            ));
        }
        let body = stats
            .bytes()
            .await
            .map_err(|e| (ScrapeStage::Fetching, ExporterError::Body(e.to_string())))?;

        result.stats = parse_stats(&body).map_err(|e| (ScrapeStage::Flattening, e))?;
        Ok(())
    }

    async fn get(&self, path: &str) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .get(&url)
            .send()
            .await
            .map_err(|e| ExporterError::Unreachable(format!("GET {url}: {e}")))
    }
}
