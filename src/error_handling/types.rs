//! Error type definitions.
//!
//! This module defines the error types used throughout the application and the
//! failure kinds tracked in run statistics.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use reqwest::StatusCode;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use crate::config::ConfigValidationError;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// The configuration failed validation.
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigValidationError),
}

/// Errors raised by a single request to one of the lookup services.
#[derive(Error, Debug)]
pub enum LookupError {
    /// The service answered with a non-success status.
    #[error("Invalid input (HTTP {0})")]
    Status(StatusCode),

    /// The request could not be sent or the body could not be read.
    #[error("request failed: {0}")]
    Request(#[from] ReqwestError),

    /// The body was not the expected JSON document.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Outcome of a failed submission.
///
/// `EmptyInput` and `LookupFailed` are the two kinds the user can cause; both
/// raise the same error flag and display as "Invalid input".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    /// The query was blank after trimming.
    #[error("Invalid input")]
    EmptyInput,

    /// The lookup service rejected the query or could not be reached.
    #[error("Invalid input: {reason}")]
    LookupFailed {
        /// Underlying cause, for diagnostics
        reason: String,
    },

    /// A newer lookup started before this one finished.
    #[error("lookup superseded by a newer submission")]
    Superseded,

    /// The initial lookup was requested a second time.
    #[error("initial lookup already ran")]
    AlreadyInitialized,

    /// The caller's public IP could not be resolved at startup.
    #[error("could not resolve own public IP: {reason}")]
    SelfIpFailed {
        /// Underlying cause, for diagnostics
        reason: String,
    },
}

impl TrackerError {
    /// Whether this failure raises the user-visible error flag.
    pub fn sets_error_flag(&self) -> bool {
        matches!(self, TrackerError::EmptyInput | TrackerError::LookupFailed { .. })
    }

    /// Statistics bucket for this failure, if it is counted at all.
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            TrackerError::EmptyInput => Some(FailureKind::EmptyInput),
            TrackerError::LookupFailed { .. } => Some(FailureKind::LookupFailed),
            TrackerError::Superseded => Some(FailureKind::Superseded),
            TrackerError::SelfIpFailed { .. } => Some(FailureKind::SelfIpFailed),
            TrackerError::AlreadyInitialized => None,
        }
    }
}

impl From<LookupError> for TrackerError {
    fn from(e: LookupError) -> Self {
        TrackerError::LookupFailed {
            reason: e.to_string(),
        }
    }
}

/// Types of failures counted during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum FailureKind {
    /// Blank submission
    EmptyInput,
    /// Rejected or unreachable lookup
    LookupFailed,
    /// Cancelled or discarded by a newer lookup
    Superseded,
    /// Own public IP could not be resolved
    SelfIpFailed,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FailureKind {
    /// Human-readable label used in statistics output.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::EmptyInput => "Empty input",
            FailureKind::LookupFailed => "Lookup failed",
            FailureKind::Superseded => "Superseded by newer lookup",
            FailureKind::SelfIpFailed => "Own IP resolution failed",
        }
    }
}
