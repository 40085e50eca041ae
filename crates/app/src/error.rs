//! Errors surfaced by the ports.
//!
//! None of these ever stop the controller: link and session errors are
//! retried by their supervisors, and sensor errors become an absent reading.

use std::time::Duration;

/// Boxed adapter error carried as a typed source.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure to bring the wireless link up.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// The station did not associate within the attempt window.
    #[error("link not established after {after:?}")]
    Timeout { after: Duration },

    /// The link driver rejected the request.
    #[error("link driver error")]
    Driver(#[source] BoxError),
}

/// Failure of the messaging session.
///
/// Variants split into two classes, see [`is_transport`](Self::is_transport):
/// transport faults force the session to be re-established, anything else is
/// logged and polling continues on the existing session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No session is open.
    #[error("session not connected")]
    NotConnected,

    /// The underlying connection failed.
    #[error("transport failure")]
    Transport(#[source] BoxError),

    /// The broker answered but refused the session.
    #[error("broker refused the session: {0}")]
    Refused(String),

    /// The session misbehaved without losing the connection.
    #[error("protocol error")]
    Protocol(#[source] BoxError),
}

impl SessionError {
    /// Whether this is a low-level I/O fault that invalidates the session.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::NotConnected | Self::Transport(_))
    }
}

/// Failure to sample the temperature probe.
#[derive(Debug, thiserror::Error)]
pub enum SensorError {
    /// The probe did not answer or answered garbage.
    #[error("sensor read failed")]
    Read(#[source] BoxError),

    /// The probe produced a value that cannot be a temperature.
    #[error("implausible reading {0}")]
    Implausible(f32),
}
