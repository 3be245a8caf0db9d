//! Error types for braidcheck
//!
//! This module defines the two hard-abort error kinds of the harness:
//! configuration problems (a capability is missing or a tolerance/config value
//! is invalid) and callback failures (a user capability returned an error).
//! Numeric mismatches are not errors; they are recorded as sub-check results.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use crate::capability::Capability;
use std::fmt;
use std::io;
use thiserror::Error;

/// Result type alias for harness operations
pub type Result<T> = std::result::Result<T, Error>;

/// Result type returned by user capabilities
pub type CallbackResult<T> = std::result::Result<T, CallbackError>;

/// Error signalled by a user capability
///
/// Mirrors the nonzero status convention of solver callbacks: a numeric
/// status code plus an optional human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackError {
    /// Nonzero status reported by the callback
    pub status: i32,
    /// Free-form description supplied by the callback
    pub message: String,
}

impl CallbackError {
    /// Create an error from a bare status code
    pub fn status(status: i32) -> Self {
        Self {
            status,
            message: String::new(),
        }
    }

    /// Create an error carrying a message (status 1)
    pub fn msg(message: impl Into<String>) -> Self {
        Self {
            status: 1,
            message: message.into(),
        }
    }

    /// Attach a message to a status code
    pub fn with_message(status: i32, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl fmt::Display for CallbackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "status {}", self.status)
        } else {
            write!(f, "status {}: {}", self.status, self.message)
        }
    }
}

impl std::error::Error for CallbackError {}

/// Error types for the harness
#[derive(Debug, Error)]
pub enum Error {
    /// A capability required by a check was not supplied
    #[error("Missing capability: {capability} is required by {required_by}")]
    MissingCapability {
        /// The absent capability
        capability: Capability,
        /// Name of the check (or aggregator) that needs it
        required_by: &'static str,
    },

    /// Tolerance or configuration value is invalid
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A user capability returned an error
    #[error("Callback failure in {capability}: {source}")]
    CallbackFailure {
        /// The capability whose call failed
        capability: Capability,
        /// The error the callback returned
        #[source]
        source: CallbackError,
    },

    /// I/O error (configuration files)
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

impl Error {
    /// Wrap a callback error with the capability that produced it
    pub fn callback(capability: Capability, source: CallbackError) -> Self {
        Error::CallbackFailure { capability, source }
    }

    /// Whether this is a configuration error (missing capability or invalid value)
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::MissingCapability { .. } | Error::InvalidConfig(_) | Error::IoError(_)
        )
    }

    /// Whether this is a failure reported by a user callback
    pub fn is_callback_failure(&self) -> bool {
        matches!(self, Error::CallbackFailure { .. })
    }

    /// The capability implicated in this error, if any
    pub fn capability(&self) -> Option<Capability> {
        match self {
            Error::MissingCapability { capability, .. }
            | Error::CallbackFailure { capability, .. } => Some(*capability),
            _ => None,
        }
    }
}

/// Attach the failing capability to a callback result
///
/// Lets call sites read `ops.init(t).during(Capability::Init)?`.
pub trait CallbackResultExt<T> {
    /// Convert a callback error into a harness [`Error::CallbackFailure`]
    fn during(self, capability: Capability) -> Result<T>;
}

impl<T> CallbackResultExt<T> for CallbackResult<T> {
    fn during(self, capability: Capability) -> Result<T> {
        self.map_err(|source| Error::callback(capability, source))
    }
}
