//! Error types for the uptime reconciler
//!
//! Each stage has its own error enum; [`ReconcileError`] is what the entry
//! point sees.

use std::path::PathBuf;
use thiserror::Error;

/// Credentials file errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No config file at any of the searched locations
    #[error("Config file not found (searched: {})", display_paths(.searched))]
    NotFound { searched: Vec<PathBuf> },

    /// File exists but could not be read
    #[error("Cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// INI syntax error or missing/mistyped key in `[Uptime]`
    #[error("Cannot parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// `uri` is empty or not an absolute URL
    #[error("Invalid API uri '{uri}': {message}")]
    InvalidUri { uri: String, message: String },
}

/// Inventory file errors
#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Cannot read inventory {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Provider API errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// Connection, TLS or body transfer failure
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("Server error {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body did not have the expected shape
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Base URI and path could not be joined
    #[error("Invalid request URL '{0}'")]
    InvalidUrl(String),
}

/// Top-level error returned by [`crate::run`]
#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error("Cannot build HTTP client: {0}")]
    Client(#[source] ApiError),

    #[error("Cannot list checks: {0}")]
    ListChecks(#[source] ApiError),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for reconciler operations
pub type Result<T> = std::result::Result<T, ReconcileError>;
