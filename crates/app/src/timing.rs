//! Retry and polling timings.
//!
//! The defaults are the device's field values: a 20 s association window
//! checked every second, a 2 s pause after giving up on an association,
//! 5 s between failed connects, a 1 s poll cadence and a 5 s pause after a
//! poll fault.

use std::time::Duration;

/// Every delay the supervisors and the poll loop sleep for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// How long one link attempt may wait for association.
    pub link_attempt_timeout: Duration,
    /// Interval between link state checks within an attempt.
    pub link_check_interval: Duration,
    /// Pause after disconnecting a timed-out attempt.
    pub link_disconnect_pause: Duration,
    /// Delay before retrying after a link driver error.
    pub link_retry_delay: Duration,
    /// Delay before retrying a failed session connect.
    pub session_retry_delay: Duration,
    /// Sleep between two polls.
    pub poll_interval: Duration,
    /// Pause after a poll fault.
    pub fault_pause: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            link_attempt_timeout: Duration::from_secs(20),
            link_check_interval: Duration::from_secs(1),
            link_disconnect_pause: Duration::from_secs(2),
            link_retry_delay: Duration::from_secs(5),
            session_retry_delay: Duration::from_secs(5),
            poll_interval: Duration::from_secs(1),
            fault_pause: Duration::from_secs(5),
        }
    }
}
