//! Error types for the datadoc library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for datadoc operations.
#[derive(Debug, Error)]
pub enum DatadocError {
    /// The input dataset is malformed or empty and cannot be profiled.
    #[error("Data validation error: {0}")]
    DataValidation(String),

    /// A configuration value is out of range. Raised before analysis begins.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no data to load.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML deserialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Failure writing or reading a snapshot document.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl DatadocError {
    /// Returns true for malformed or empty input datasets.
    pub fn is_data_validation(&self) -> bool {
        matches!(self, DatadocError::DataValidation(_))
    }

    /// Returns true for invalid configuration values.
    pub fn is_configuration(&self) -> bool {
        matches!(self, DatadocError::Configuration(_))
    }
}

/// Result type alias for datadoc operations.
pub type Result<T> = std::result::Result<T, DatadocError>;
