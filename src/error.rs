//! Error types for the arqueo engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while processing a reconciliation.
//!
//! Malformed numeric input is deliberately NOT an error anywhere in the
//! engine: a count or amount that cannot be parsed contributes zero to its
//! total (see [`crate::calculation::parse_amount`]).

use thiserror::Error;

/// The main error type for the arqueo engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use arqueo_engine::error::EngineError;
///
/// let error = EngineError::RecordNotFound { id: 42 };
/// assert_eq!(error.to_string(), "Arqueo not found: 42");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No stored arqueo exists with the requested id.
    #[error("Arqueo not found: {id}")]
    RecordNotFound {
        /// The id that was looked up.
        id: i64,
    },

    /// The persistence layer failed.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },

    /// The PDF renderer failed to produce a document.
    #[error("Render error: {message}")]
    Render {
        /// A description of the render failure.
        message: String,
    },

    /// The HTTP server failed to bind or serve.
    #[error("Server error: {message}")]
    Server {
        /// A description of the server failure.
        message: String,
    },
}

impl From<rusqlite::Error> for EngineError {
    fn from(error: rusqlite::Error) -> Self {
        EngineError::Storage {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(error: serde_json::Error) -> Self {
        EngineError::Storage {
            message: format!("corrupt stored document: {}", error),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
