//! Scrape data model.
//!
//! A [`ScrapeResult`] is built fresh by every scrape and converted into a
//! [`MetricSnapshot`] before the response is rendered. Nothing here is cached
//! between scrapes.

use serde_json::{Map, Value};

use crate::error::{ExporterError, Result};

/// Outcome of one ping + stats fetch.
#[derive(Debug, Clone, Default)]
pub struct ScrapeResult {
    /// `None` when the ping never produced a status (connectivity failure).
    pub up: Option<bool>,
    /// Top-level stats object as returned by `/stats`; empty on failure.
    pub stats: Map<String, Value>,
    pub duration_seconds: f64,
    pub errored: bool,
}

/// A single derived gauge.
#[derive(Debug, Clone, PartialEq)]
pub struct Gauge {
    pub name: String,
    pub help: String,
    pub value: f64,
}

/// Everything a metrics response contains.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSnapshot {
    /// Namespace prefix applied to every metric name (`riak`).
    pub namespace: String,
    /// Gauges flattened from the stats payload.
    pub gauges: Vec<Gauge>,
    pub scrapes_total: u64,
    pub last_scrape_duration_seconds: f64,
    pub last_scrape_error: bool,
    pub up: bool,
    /// Version reported through `<namespace>_exporter_build_info`.
    pub build_version: String,
}

impl MetricSnapshot {
    pub fn from_result(
        namespace: &str,
        result: &ScrapeResult,
        scrapes_total: u64,
        build_version: &str,
    ) -> Self {
        Self {
            namespace: namespace.to_string(),
            gauges: flatten(namespace, &result.stats),
            scrapes_total,
            last_scrape_duration_seconds: result.duration_seconds.max(0.0),
            last_scrape_error: result.errored,
            up: result.up.unwrap_or(false),
            build_version: build_version.to_string(),
        }
    }

    /// Look up a derived gauge by its full metric name.
    pub fn gauge(&self, name: &str) -> Option<&Gauge> {
        self.gauges.iter().find(|g| g.name == name)
    }
}

/// Parse a `/stats` body. Anything but a JSON object is rejected.
pub fn parse_stats(body: &[u8]) -> Result<Map<String, Value>> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| ExporterError::Parse(e.to_string()))?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ExporterError::Parse(format!(
            "expected a JSON object, got {}",
            kind_of(&other)
        ))),
    }
}

/// Turn every numeric top-level value into one gauge named `<namespace>_<key>`.
///
/// Strings, bools, nulls, arrays and nested objects are skipped without error.
pub fn flatten(namespace: &str, stats: &Map<String, Value>) -> Vec<Gauge> {
    let mut gauges = Vec::with_capacity(stats.len());
    for (key, value) in stats {
        let Value::Number(n) = value else {
            continue;
        };
        let Some(v) = n.as_f64() else {
            continue;
        };
        let name = format!("{namespace}_{key}");
        if !is_valid_metric_name(&name) {
            tracing::debug!(key = %key, "skipping stat with unrepresentable metric name");
            continue;
        }
        gauges.push(Gauge {
            name,
            help: key.clone(),
            value: v,
        });
    }
    gauges
}

/// `[a-zA-Z_:][a-zA-Z0-9_:]*`
pub fn is_valid_metric_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
