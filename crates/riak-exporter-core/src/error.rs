//! Shared error type across riak-exporter crates.

use thiserror::Error;

/// Error categories (stable API, used in logs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unparseable flags/config, unbindable listen address. Fatal at startup.
    Config,
    /// Target unreachable or timed out.
    Connectivity,
    /// Unexpected HTTP status from the target.
    Protocol,
    /// Unreadable body or malformed stats payload.
    Payload,
    /// Internal failure.
    Internal,
}

impl ErrorKind {
    /// String representation used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Config => "CONFIG",
            ErrorKind::Connectivity => "CONNECTIVITY",
            ErrorKind::Protocol => "PROTOCOL",
            ErrorKind::Payload => "PAYLOAD",
            ErrorKind::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ExporterError>;

/// Unified error type used by core and the exporter binary.
#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("invalid config: {0}")]
    Config(String),
    #[error("target unreachable: {0}")]
    Unreachable(String),
    #[error("unexpected status {status} from {endpoint}")]
    UnexpectedStatus { endpoint: String, status: u16 },
    #[error("unreadable body: {0}")]
    Body(String),
    #[error("malformed stats payload: {0}")]
    Parse(String),
    #[error("bind failed: {0}")]
    Bind(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl ExporterError {
    /// Map an error to its category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExporterError::Config(_) | ExporterError::Bind(_) => ErrorKind::Config,
            ExporterError::Unreachable(_) => ErrorKind::Connectivity,
            ExporterError::UnexpectedStatus { .. } => ErrorKind::Protocol,
            ExporterError::Body(_) | ExporterError::Parse(_) => ErrorKind::Payload,
            ExporterError::Internal(_) => ErrorKind::Internal,
        }
    }
}
