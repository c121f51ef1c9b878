// Copyright 2026 QRNG Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for the QRNG core.

use std::fmt;

/// Result type alias for QRNG operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level QRNG error types.
#[derive(Debug)]
pub enum Error {
    /// Caller supplied an invalid argument (zero outcomes, zero shots, ...)
    InvalidArgument(String),
    /// Backend error
    Backend(BackendError),
    /// Measurement analysis error
    Analysis(AnalysisError),
    /// Configuration error
    Config(String),
    /// IO error
    Io(std::io::Error),
    /// Serialization error
    Serialization(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Error::Backend(e) => write!(f, "Backend error: {}", e),
            Error::Analysis(e) => write!(f, "Analysis error: {}", e),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Io(e) => write!(f, "IO error: {}", e),
            Error::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Backend(e) => Some(e),
            Error::Analysis(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<BackendError> for Error {
    fn from(e: BackendError) -> Self {
        Error::Backend(e)
    }
}

impl From<AnalysisError> for Error {
    fn from(e: AnalysisError) -> Self {
        Error::Analysis(e)
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

/// Backend-specific errors.
#[derive(Debug, Clone)]
pub enum BackendError {
    /// Backend cannot be reached or the session is invalid
    Unavailable(String),
    /// Backend rejected or aborted a submitted job
    ExecutionFailed(String),
    /// Authentication failed
    AuthenticationFailed(String),
    /// Execution exceeded its deadline
    Timeout(String),
    /// Request violates the backend's capabilities or limits
    InvalidRequest(String),
    /// HTTP transport error (for remote backends)
    Http(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Unavailable(msg) => write!(f, "Backend unavailable: {}", msg),
            BackendError::ExecutionFailed(msg) => write!(f, "Execution failed: {}", msg),
            BackendError::AuthenticationFailed(msg) => write!(f, "Authentication failed: {}", msg),
            BackendError::Timeout(msg) => write!(f, "Timeout: {}", msg),
            BackendError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            BackendError::Http(msg) => write!(f, "HTTP error: {}", msg),
        }
    }
}

impl std::error::Error for BackendError {}

/// Errors produced while interpreting measurement counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// Mean occurrence count is zero, so the spread metric is undefined
    DegenerateDistribution,
    /// Every measured outcome fell outside the requested range
    NoValidOutcomes {
        /// Upper bound of the requested range (exclusive)
        num_outcomes: u64,
    },
    /// Backend returned a key that is not a binary bit pattern
    MalformedBitPattern(String),
    /// Backend returned no measured patterns at all
    EmptyResult,
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::DegenerateDistribution => {
                write!(f, "Degenerate distribution: mean occurrence count is zero")
            }
            AnalysisError::NoValidOutcomes { num_outcomes } => {
                write!(
                    f,
                    "No measured outcome fell inside [0, {}]",
                    num_outcomes.saturating_sub(1)
                )
            }
            AnalysisError::MalformedBitPattern(pattern) => {
                write!(f, "Malformed bit pattern: {:?}", pattern)
            }
            AnalysisError::EmptyResult => write!(f, "Execution returned no measured patterns"),
        }
    }
}

impl std::error::Error for AnalysisError {}
