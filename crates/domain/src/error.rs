//! Common error types used across the workspace.
//!
//! Decoding never fails outright: a payload that cannot be interpreted is
//! carried as a [`PayloadError`] inside
//! [`Command::Unrecognized`](crate::command::Command::Unrecognized) so the
//! router can log it and move on.

/// Why a payload on a known topic could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    /// The payload bytes are not valid UTF-8.
    #[error("payload is not valid UTF-8")]
    NotUtf8,

    /// The payload is text but not one of the values the topic accepts.
    #[error("unsupported value {0:?}")]
    Unsupported(String),
}
