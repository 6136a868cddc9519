//! Collapses every way a generation can fail into one displayable
//! [`GenerationError`].
//!
//! Three sources feed into it:
//! - the provider reports a failure in its response ([`GenerationError::reported`]),
//! - the provider call returns `Err` ([`GenerationError::from_rejection`]),
//! - the provider panics ([`GenerationError::unexpected`]).

use std::io::ErrorKind as IoErrorKind;
use thiserror::Error;

/// Shown when the provider could not be reached at all.
pub const CONNECTIVITY_MESSAGE: &str = "Failed to connect to the server";
/// Shown when the provider flags a failure but gives no message.
pub const MISSING_ERROR_MESSAGE: &str = "Unknown error while getting the generated response";
/// Shown for failures that are not errors at all (a panicking provider).
pub const UNEXPECTED_MESSAGE: &str = "Unexpected error";

/// Top-level message HTTP clients use for a request that never got a response.
pub const FETCH_FAILED: &str = "fetch failed";

/// Raised by providers that could not reach their backend.
#[derive(Debug, Error)]
#[error("fetch failed: {reason}")]
pub struct Unreachable {
    pub reason: String,
}

impl Unreachable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Where a failure came from. Informational only: callers are expected to
/// show [`GenerationError::message`] and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Connectivity,
    Provider,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct GenerationError {
    kind: ErrorKind,
    message: String,
}

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// A failure the provider put in its response. The message is used
    /// verbatim unless it is missing or empty.
    #[must_use]
    pub fn reported(error: Option<String>) -> Self {
        let message = error
            .filter(|msg| !msg.is_empty())
            .unwrap_or_else(|| MISSING_ERROR_MESSAGE.to_string());
        Self {
            kind: ErrorKind::Provider,
            message,
        }
    }

    /// A provider call that returned `Err`.
    #[must_use]
    pub fn from_rejection(err: &anyhow::Error) -> Self {
        if is_connectivity_failure(err) {
            tracing::warn!(error = %err, "generation provider unreachable");
            return Self {
                kind: ErrorKind::Connectivity,
                message: CONNECTIVITY_MESSAGE.to_string(),
            };
        }

        tracing::warn!(error = %err, "generation provider rejected the request");
        Self::reported(Some(err.to_string()))
    }

    #[must_use]
    pub fn unexpected() -> Self {
        Self {
            kind: ErrorKind::Unknown,
            message: UNEXPECTED_MESSAGE.to_string(),
        }
    }
}

pub fn is_connectivity_failure(err: &anyhow::Error) -> bool {
    if err.to_string() == FETCH_FAILED {
        return true;
    }

    err.chain().any(|cause| {
        if cause.downcast_ref::<Unreachable>().is_some() {
            return true;
        }
        cause.downcast_ref::<std::io::Error>().is_some_and(|io| {
            matches!(
                io.kind(),
                IoErrorKind::ConnectionRefused
                    | IoErrorKind::ConnectionReset
                    | IoErrorKind::ConnectionAborted
                    | IoErrorKind::NotConnected
                    | IoErrorKind::AddrNotAvailable
            )
        })
    })
}
