//! Error types for the resizer core.
//!
//! `RemoteError` describes what went wrong talking to the remote store.
//! `SyncError` says which phase of a sync cycle it went wrong in, and knows
//! the human-readable message the UI shows for it.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Shown when a validate or update failure carries no message of its own.
pub const GENERIC_SYNC_MESSAGE: &str = "An error occurred while updating dimensions.";

/// Shown when the initial fetch fails.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to load initial rectangle dimensions. Please try again.";

/// Errors produced by a [`crate::remote::RemoteStore`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    /// The remote answered with a non-success status.
    #[error("remote rejected request: status {status}")]
    Rejected { status: u16, message: Option<String> },

    /// The request never produced a response (connect, timeout, I/O).
    #[error("remote request failed: {0}")]
    Request(String),

    /// The response body could not be decoded.
    #[error("remote response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl RemoteError {
    /// The failure payload's message, if the remote sent one.
    #[must_use]
    pub fn payload_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message: Some(message), .. } => Some(message.as_str()),
            _ => None,
        }
    }
}

/// A failed sync cycle, tagged with the phase that failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    #[error("initial fetch failed: {0}")]
    Fetch(RemoteError),

    #[error("validation failed: {0}")]
    Validation(RemoteError),

    #[error("update failed: {0}")]
    Update(RemoteError),
}

impl SyncError {
    /// The message the UI shows for this failure.
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            Self::Fetch(_) => FETCH_FAILED_MESSAGE.to_owned(),
            Self::Validation(err) | Self::Update(err) => {
                err.payload_message().unwrap_or(GENERIC_SYNC_MESSAGE).to_owned()
            }
        }
    }

    /// The remote error underneath.
    #[must_use]
    pub fn remote(&self) -> &RemoteError {
        match self {
            Self::Fetch(err) | Self::Validation(err) | Self::Update(err) => err,
        }
    }
}

/// A numeric field held text that is not a usable number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("not a number: {0:?}")]
    NotANumber(String),
}

/// A configuration value could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("config parse failed: {0}")]
pub struct ConfigError(pub String);

/// A resize direction name was not one of the four corners.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown direction '{0}' (expected top-left, top-right, bottom-left, or bottom-right)")]
pub struct ParseDirectionError(pub String);
