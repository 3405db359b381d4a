//! Error types and result aliases for hopper operations.
//!
//! Provides a unified error type that covers all possible error conditions
//! across the hopper crates with actionable error messages.

use thiserror::Error;

/// Unified error type for all hopper operations
#[derive(Error, Debug)]
pub enum HopperError {
    // Config errors
    #[error("Failed to parse hopper.toml: {message}")]
    TomlParse { message: String },

    #[error("Configuration field '{field}' is invalid: {reason}")]
    ConfigValidation { field: String, reason: String },

    // Registry errors
    #[error("Project '{identity}' not found in registry")]
    ProjectNotFound { identity: String },

    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Failed to list versions for '{identity}': {message}")]
    VersionListing { identity: String, message: String },

    // Archive errors
    #[error("Failed to read archive '{filename}': {message}")]
    ArchiveRead { filename: String, message: String },

    // Download errors
    #[error("Failed to download '{filename}': {message}")]
    Download { filename: String, message: String },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for hopper operations
pub type HopperResult<T> = Result<T, HopperError>;

impl HopperError {
    /// Create a network error from any error type
    pub fn network<E>(message: String, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network {
            message,
            source: Some(Box::new(source)),
        }
    }

    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            HopperError::ProjectNotFound { .. } => {
                Some("Check the mod's Modrinth page for its slug, or add an override to hopper.toml")
            }
            HopperError::Network { .. } => Some("Check your internet connection and try again"),
            HopperError::VersionListing { .. } => {
                Some("The registry may be temporarily unavailable; retry in a moment")
            }
            HopperError::ConfigValidation { .. } => {
                Some("Review hopper.toml against the documented schema")
            }
            _ => None,
        }
    }
}
