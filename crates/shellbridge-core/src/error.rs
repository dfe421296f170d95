//! Error types for shellbridge

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for shellbridge operations
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Main error type for shellbridge
///
/// Setup failures (`InvalidLogDir`, `TranscriptNotFound`,
/// `UnsupportedTarget`, `Config`) are raised before any command is
/// attempted and never silently defaulted. `CommandTimeout` is recoverable:
/// the caller decides whether to retry with a larger budget.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Configured log directory does not exist or is not a directory
    #[error("invalid log directory: {}", .0.display())]
    InvalidLogDir(PathBuf),

    /// No transcript file was found in the log directory
    #[error("no transcript file found under {}", .0.display())]
    TranscriptNotFound(PathBuf),

    /// Unknown terminal target requested
    #[error("unsupported terminal target: {0:?}")]
    UnsupportedTarget(String),

    /// The end marker was not observed within the wait budget.
    /// Carries whatever was captured after the start marker, for diagnostics.
    #[error("no end marker observed within {}s", waited.as_secs())]
    CommandTimeout { waited: Duration, partial: String },

    /// `stop_recording` found no start-record marker in the transcript
    #[error("recording was never started")]
    RecordingNotStarted,

    /// Keystroke delivery to the terminal program failed
    #[error("keystroke injection failed: {0}")]
    Injection(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BridgeError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a new injection error
    pub fn injection(message: impl Into<String>) -> Self {
        Self::Injection(message.into())
    }

    /// Partial output captured before a timeout, if any
    pub fn partial_output(&self) -> Option<&str> {
        match self {
            Self::CommandTimeout { partial, .. } if !partial.is_empty() => Some(partial),
            _ => None,
        }
    }
}
