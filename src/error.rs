//! Error types for fitclub-report.
//!
//! Defines the main error enum used throughout the application.

use thiserror::Error;

/// Main error type for report operations.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Database connection errors (host unreachable, auth failed, etc.)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution errors, tagged with the catalog operation that failed.
    #[error("Query error in '{operation}': {message}")]
    Query { operation: String, message: String },

    /// Output file errors (cannot create file, serialization failure).
    #[error("Export error: {0}")]
    Export(String),

    /// Configuration errors (invalid config file, missing required fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal application errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ReportError {
    /// Creates a connection error with the given message.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error for the named operation.
    pub fn query(operation: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Query {
            operation: operation.into(),
            message: msg.into(),
        }
    }

    /// Creates an export error with the given message.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Re-tags a query error with the operation that issued it.
    ///
    /// Database clients do not know which catalog entry they are running,
    /// so they report errors under the `sql` placeholder.
    pub fn for_operation(self, operation: &str) -> Self {
        match self {
            Self::Query { message, .. } => Self::query(operation, message),
            other => other,
        }
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Connection(_) => "Connection Error",
            Self::Query { .. } => "Query Error",
            Self::Export(_) => "Export Error",
            Self::Config(_) => "Configuration Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using ReportError.
pub type Result<T> = std::result::Result<T, ReportError>;
