//! Shared application state for the exporter.

use std::sync::Arc;

use riak_exporter_core::error::Result;

use crate::collector::Exporter;
use crate::config::ExporterConfig;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ExporterConfig,
    exporter: Exporter,
}

impl AppState {
    /// Build application state from a validated config.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: ExporterConfig) -> Result<Self> {
        let exporter = Exporter::new(&cfg.riak)?;
        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, exporter }),
        })
    }

    pub fn cfg(&self) -> &ExporterConfig {
        &self.inner.cfg
    }

    pub fn exporter(&self) -> &Exporter {
        &self.inner.exporter
    }
}
