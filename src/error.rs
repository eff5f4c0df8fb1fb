//! Error types for verb-forge
//!
//! This module defines the error types used throughout the application.

use thiserror::Error;

/// Result type alias for verb-forge
pub type Result<T> = std::result::Result<T, VerbForgeError>;

/// Main error type for verb-forge
#[derive(Error, Debug)]
pub enum VerbForgeError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// IO-related errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP-related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database URL that names no supported backend
    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),

    /// Completion API failures (non-2xx status or unusable envelope)
    #[error("{provider} API error (status {status}): {message}")]
    Api {
        provider: String,
        status: u16,
        message: String,
    },

    /// Model output that could not be repaired into valid JSON
    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    /// A string that names no variant of a closed grammatical set
    #[error("Unrecognized {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Command syntax errors
    #[error("Invalid syntax for {command}: expected {expected}")]
    InvalidCommandSyntax { command: String, expected: String },

    /// Unknown command errors
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}
