//! Climate policy: gates a climate request on the live temperature.
//!
//! A request to run the climate unit is advisory: the reading decides.
//! `ON` and `AUTO` behave identically, so an `ON` request on a cool day
//! switches the unit **off**. `OFF` always wins and needs no reading.

use std::fmt;
use std::str::FromStr;

use crate::actuator::SwitchState;
use crate::error::PayloadError;
use crate::temperature::Temperature;

/// Default switching threshold in degrees Celsius.
pub const DEFAULT_THRESHOLD_CELSIUS: f32 = 25.0;

/// Payload accepted on the climate topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClimateMode {
    On,
    Auto,
    Off,
}

impl ClimateMode {
    /// Whether this mode needs a temperature reading before acting.
    #[must_use]
    pub fn needs_reading(self) -> bool {
        matches!(self, Self::On | Self::Auto)
    }
}

impl fmt::Display for ClimateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On => f.write_str("ON"),
            Self::Auto => f.write_str("AUTO"),
            Self::Off => f.write_str("OFF"),
        }
    }
}

impl FromStr for ClimateMode {
    type Err = PayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ON" => Ok(Self::On),
            "AUTO" => Ok(Self::Auto),
            "OFF" => Ok(Self::Off),
            other => Err(PayloadError::Unsupported(other.to_string())),
        }
    }
}

/// Threshold rule for the climate unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimatePolicy {
    threshold: Temperature,
}

impl Default for ClimatePolicy {
    fn default() -> Self {
        Self::new(Temperature::celsius(DEFAULT_THRESHOLD_CELSIUS))
    }
}

impl ClimatePolicy {
    /// Create a policy switching on strictly above `threshold`.
    #[must_use]
    pub fn new(threshold: Temperature) -> Self {
        Self { threshold }
    }

    /// The switching threshold.
    #[must_use]
    pub fn threshold(&self) -> Temperature {
        self.threshold
    }

    /// Decide the climate output for `mode` given the current reading.
    ///
    /// Returns `None` when no actuation should happen, which is the case
    /// only for `ON`/`AUTO` without a reading.
    #[must_use]
    pub fn decide(&self, mode: ClimateMode, reading: Option<Temperature>) -> Option<SwitchState> {
        match mode {
            ClimateMode::Off => Some(SwitchState::Off),
            ClimateMode::On | ClimateMode::Auto => {
                reading.map(|t| SwitchState::from(t > self.threshold))
            }
        }
    }
}
