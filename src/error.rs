//! Error types for sloany.
//!
//! Defines the main error enum used throughout the application.

use thiserror::Error;

/// Main error type for sloany operations.
#[derive(Error, Debug)]
pub enum SloanyError {
    /// Remote query errors (SkyServer unreachable, bad status, malformed response).
    #[error("Query error: {0}")]
    Query(String),

    /// A result row lacks a field required to locate its spectrum.
    #[error("Malformed row: {0}")]
    MalformedRow(String),

    /// Network-level failure while fetching a spectrum (DNS, connection refused, ...).
    #[error("Transport error: {0}")]
    Transport(String),

    /// Configuration errors (invalid config file, bad endpoint URL, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Local file I/O errors (query files, spectrum files, METADATA).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SloanyError {
    /// Creates a query error with the given message.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a malformed-row error with the given message.
    pub fn malformed_row(msg: impl Into<String>) -> Self {
        Self::MalformedRow(msg.into())
    }

    /// Creates a transport error with the given message.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Query(_) => "Query Error",
            Self::MalformedRow(_) => "Malformed Row",
            Self::Transport(_) => "Transport Error",
            Self::Config(_) => "Configuration Error",
            Self::Io(_) => "I/O Error",
        }
    }
}

/// Result type alias using SloanyError.
pub type Result<T> = std::result::Result<T, SloanyError>;
