//! Error types for comfy-copilot
//!
//! This module defines the domain error type used throughout the service,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for comfy-copilot operations
///
/// Covers request validation, configuration loading, the workflow catalog,
/// upload storage and frame streaming. HTTP handlers map `Validation` to a
/// 400 response and everything else to a 500.
#[derive(Error, Debug)]
pub enum CopilotError {
    /// Malformed or missing request input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Workflow template catalog errors (unreadable or malformed files)
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Upload storage errors
    #[error("Upload error: {0}")]
    Upload(String),

    /// Frame delivery failed (usually a disconnected client)
    #[error("Stream error: {0}")]
    Stream(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CopilotError {
    /// Returns true when the error was caused by bad caller input
    pub fn is_validation(&self) -> bool {
        matches!(self, CopilotError::Validation(_))
    }
}

/// Result type alias for comfy-copilot operations
///
/// Uses `anyhow::Error` so call sites can attach context; the HTTP layer
/// downcasts to [`CopilotError`] to pick a status code.
pub type Result<T> = anyhow::Result<T>;
