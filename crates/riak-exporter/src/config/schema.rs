use std::net::{SocketAddr, ToSocketAddrs};

use reqwest::Url;
use serde::Deserialize;
use riak_exporter_core::error::{ExporterError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub web: WebSection,

    #[serde(default)]
    pub riak: RiakSection,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            web: WebSection::default(),
            riak: RiakSection::default(),
        }
    }
}

impl ExporterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ExporterError::Config(format!(
                "unsupported config version {}",
                self.version
            )));
        }
        self.web.validate()?;
        self.riak.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebSection {
    /// A bare `:port` binds every IPv4 interface (`0.0.0.0`).
    #[serde(default = "default_listen_address")]
    pub listen_address: String,

    #[serde(default = "default_telemetry_path")]
    pub telemetry_path: String,
}

impl Default for WebSection {
    fn default() -> Self {
        Self {
            listen_address: default_listen_address(),
            telemetry_path: default_telemetry_path(),
        }
    }
}

impl WebSection {
    pub fn validate(&self) -> Result<()> {
        if !self.telemetry_path.starts_with('/') || self.telemetry_path == "/" {
            return Err(ExporterError::Config(
                "web.telemetry_path must start with '/' and must not be '/'".into(),
            ));
        }
        if self
            .telemetry_path
            .contains(|c: char| matches!(c, '*' | ':' | '{' | '}'))
        {
            return Err(ExporterError::Config(format!(
                "web.telemetry_path {:?} must be a literal path (no '*', ':', '{{' or '}}')",
                self.telemetry_path
            )));
        }
        if self.telemetry_path == crate::router::HEALTHZ_PATH {
            return Err(ExporterError::Config(format!(
                "web.telemetry_path must not be {}",
                crate::router::HEALTHZ_PATH
            )));
        }
        self.socket_addr()?;
        Ok(())
    }

    /// Resolve `listen_address` into a bindable address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let addr = if self.listen_address.starts_with(':') {
            format!("0.0.0.0{}", self.listen_address)
        } else {
            self.listen_address.clone()
        };
        addr.to_socket_addrs()
            .map_err(|e| {
                ExporterError::Config(format!(
                    "web.listen_address {:?} is invalid: {e}",
                    self.listen_address
                ))
            })?
            .next()
            .ok_or_else(|| {
                ExporterError::Config(format!(
                    "web.listen_address {:?} resolved to nothing",
                    self.listen_address
                ))
            })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RiakSection {
    #[serde(default = "default_uri")]
    pub uri: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for RiakSection {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl RiakSection {
    pub fn validate(&self) -> Result<()> {
        self.base_url()?;
        if !(100..=60000).contains(&self.timeout_ms) {
            return Err(ExporterError::Config(
                "riak.timeout_ms must be between 100 and 60000".into(),
            ));
        }
        Ok(())
    }

    /// Validated base URI without a trailing slash.
    pub fn base_url(&self) -> Result<String> {
        let url = Url::parse(&self.uri)
            .map_err(|e| ExporterError::Config(format!("riak.uri {:?} is invalid: {e}", self.uri)))?;
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(ExporterError::Config(format!(
                "riak.uri {:?} must be an absolute http(s) URL",
                self.uri
            )));
        }
        Ok(self.uri.trim_end_matches('/').to_string())
    }
}

fn default_version() -> u32 {
    1
}
fn default_listen_address() -> String {
    ":9104".into()
}
fn default_telemetry_path() -> String {
    "/metrics".into()
}
fn default_uri() -> String {
    "http://localhost:8098".into()
}
fn default_timeout_ms() -> u64 {
    5000
}
