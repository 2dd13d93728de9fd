//! Exporter config loader (strict parsing).
//!
//! Resolution order: built-in defaults, then the optional YAML file, then
//! command-line overrides. The result is validated once and never mutated.

pub mod schema;

use std::fs;

use riak_exporter_core::error::{ExporterError, Result};

use crate::cli::CliOptions;

pub use schema::{ExporterConfig, RiakSection, WebSection};

pub fn load_from_file(path: &str) -> Result<ExporterConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| ExporterError::Config(format!("read config {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ExporterConfig> {
    let cfg: ExporterConfig = serde_yaml::from_str(s)
        .map_err(|e| ExporterError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Build the final config from CLI options (and the file they point at).
pub fn resolve(opts: &CliOptions) -> Result<ExporterConfig> {
    let mut cfg = match &opts.config_file {
        Some(path) => load_from_file(path)?,
        None => ExporterConfig::default(),
    };

    if let Some(v) = &opts.listen_address {
        cfg.web.listen_address = v.clone();
    }
    if let Some(v) = &opts.telemetry_path {
        cfg.web.telemetry_path = v.clone();
    }
    if let Some(v) = &opts.riak_uri {
        cfg.riak.uri = v.clone();
    }
    if let Some(v) = opts.timeout_ms {
        cfg.riak.timeout_ms = v;
    }

    cfg.validate()?;
    Ok(cfg)
}
