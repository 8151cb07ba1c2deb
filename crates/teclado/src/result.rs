//! Result and error types for Teclado.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for Teclado operations
pub type TecladoResult<T> = Result<T, TecladoError>;

/// Errors that can occur in Teclado
#[derive(Debug, Error)]
pub enum TecladoError {
    /// Keyboard was required on screen but is not there
    #[error("Keyboard precondition failed: {message}")]
    KeyboardNotVisible {
        /// Error message
        message: String,
        /// Diagnostic screenshot path, when one was captured
        screenshot: Option<PathBuf>,
    },

    /// Wait operation exhausted its timeout budget
    #[error("Timed out after {ms}ms: {message}")]
    WaitTimeout {
        /// Configured timeout message
        message: String,
        /// Timeout in milliseconds
        ms: u64,
        /// Diagnostic screenshot path, when one was captured
        screenshot: Option<PathBuf>,
    },

    /// Legacy automation was used without a live session
    #[error("Automation session unavailable: {message}")]
    AutomationUnavailable {
        /// Error message
        message: String,
    },

    /// Device response could not be interpreted
    #[error("Malformed device response: {message}")]
    MalformedResponse {
        /// Error message
        message: String,
    },

    /// Element query transport failure
    #[error("Query failed: {message}")]
    Query {
        /// Error message
        message: String,
    },

    /// Screenshot capture or decode failure
    #[error("Screenshot failed: {message}")]
    Screenshot {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
