//! Actuators: the binary outputs the device drives.

use std::fmt;
use std::str::FromStr;

use crate::error::PayloadError;

/// One of the device's binary outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActuatorKind {
    Light,
    Fan,
    Climate,
}

impl ActuatorKind {
    /// Every actuator, in wiring order.
    pub const ALL: [Self; 3] = [Self::Light, Self::Fan, Self::Climate];

    /// Lowercase name used in logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Fan => "fan",
            Self::Climate => "climate",
        }
    }
}

impl fmt::Display for ActuatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested state of a binary output.
///
/// Writes are absolute: applying the same state twice leaves the output
/// where one application would.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwitchState {
    On,
    Off,
}

impl SwitchState {
    /// Whether this is [`On`](Self::On).
    #[must_use]
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

impl From<bool> for SwitchState {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

impl fmt::Display for SwitchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On => f.write_str("on"),
            Self::Off => f.write_str("off"),
        }
    }
}

/// Parses the wire payloads `ON` and `OFF`, case-sensitive.
impl FromStr for SwitchState {
    type Err = PayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ON" => Ok(Self::On),
            "OFF" => Ok(Self::Off),
            other => Err(PayloadError::Unsupported(other.to_string())),
        }
    }
}
