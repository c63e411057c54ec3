//! Domain-specific error types for campaign-pulse using thiserror
//!
//! Each subsystem gets its own enum so callers can match on the failure
//! they care about; `PulseError` wraps all of them for glue code.

use std::path::PathBuf;
use thiserror::Error;

use crate::core::types::ConnectionState;

/// Main error type for campaign-pulse operations
#[derive(Error, Debug)]
pub enum PulseError {
    #[error("Streaming connection failed")]
    Connection(#[from] ConnectionError),

    #[error("Inbound message rejected")]
    Message(#[from] MessageError),

    #[error("Historical data fetch failed")]
    Fetch(#[from] FetchError),

    #[error("Export operation failed")]
    Export(#[from] ExportError),

    #[error("Configuration error")]
    Config(#[from] ConfigError),
}

/// Streaming transport errors
#[derive(Error, Debug)]
pub enum ConnectionError {
    #[error("Cannot send while {state}: no live session")]
    NotConnected { state: ConnectionState },

    #[error("Failed to open session to {endpoint}: {reason}")]
    Open { endpoint: String, reason: String },

    #[error("Transport failure: {reason}")]
    Transport { reason: String },

    #[error("Failed to encode outbound message")]
    Encode(#[source] serde_json::Error),

    #[error("Session task is gone")]
    SessionGone,
}

/// Inbound streaming message errors. These never leave the connection manager;
/// they are logged and the message is dropped.
#[derive(Error, Debug)]
pub enum MessageError {
    #[error("Malformed message: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("Payload of '{kind}' message is not a performance record")]
    InvalidPayload {
        kind: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid value for {field}: {value}")]
    InvalidMetric { field: String, value: f64 },
}

/// Errors reported by the historical data collaborator
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request to {endpoint} was not authorized")]
    Unauthorized { endpoint: String },

    #[error("Request to {endpoint} failed: {reason}")]
    Request { endpoint: String, reason: String },

    #[error("Response from {endpoint} could not be decoded")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read dataset {path}")]
    Dataset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, FetchError::Unauthorized { .. })
    }
}

/// Export errors
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Serialization to {format} failed")]
    Serialization {
        format: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Row {index} is not an object and cannot become a CSV line")]
    NotAnObject { index: usize },

    #[error("Failed to write export to {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write configuration {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize configuration")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration value for {field}: {reason}")]
    Invalid { field: String, reason: String },
}

pub type PulseResult<T> = Result<T, PulseError>;
