/*!
 * Error types for the textsync application.
 *
 * This module contains custom error types for the alignment engine and its
 * collaborators, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when an alignment source produces word timestamps
#[derive(Error, Debug)]
pub enum AlignerError {
    /// Error when sending a request to an aligner service fails
    #[error("Aligner request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing the aligner output fails
    #[error("Failed to parse aligner output: {0}")]
    ParseError(String),

    /// Error returned by an aligner service
    #[error("Aligner responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the service
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// External aligner process exited unsuccessfully
    #[error("Aligner command failed ({status}): {stderr}")]
    CommandFailed {
        /// Exit status description
        status: String,
        /// Filtered standard error of the process
        stderr: String,
    },

    /// Aligner did not finish in time
    #[error("Aligner timed out after {secs} seconds")]
    Timeout {
        /// Configured timeout
        secs: u64,
    },

    /// A word timestamp record violates the time invariants
    #[error("Invalid word timestamp record: {0}")]
    InvalidRecord(String),

    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the matcher
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MatchError {
    /// Matching was invoked without text segments or without word timestamps
    #[error(
        "Insufficient input for matching: {text_segments} text segment(s), {word_timestamps} word timestamp(s)"
    )]
    InsufficientInput {
        /// Number of text segments supplied
        text_segments: usize,
        /// Number of word timestamps supplied
        word_timestamps: usize,
    },

    /// A supplied ledger does not track the supplied word timestamps
    #[error("Ledger tracks {ledger} word(s) but {word_timestamps} word timestamp(s) were supplied")]
    LedgerSizeMismatch {
        ledger: usize,
        word_timestamps: usize,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from an alignment source
    #[error("Aligner error: {0}")]
    Aligner(#[from] AlignerError),

    /// Error from the matcher
    #[error("Match error: {0}")]
    Match(#[from] MatchError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
