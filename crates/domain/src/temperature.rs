//! Temperature readings.

use std::fmt;

/// A temperature in degrees Celsius, as sampled by the probe.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Temperature(f32);

impl Temperature {
    /// Wrap a value in degrees Celsius.
    #[must_use]
    pub fn celsius(value: f32) -> Self {
        Self(value)
    }

    /// The value in degrees Celsius.
    #[must_use]
    pub fn as_celsius(self) -> f32 {
        self.0
    }

    /// Body of the reply published on the response topic.
    #[must_use]
    pub fn response_payload(self) -> String {
        format!("Temperature: {self}\u{b0}C")
    }
}

/// Renders the sensor's native representation: integral values keep one
/// decimal place (`20.0`), everything else uses the shortest exact form.
impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_finite() && self.0.fract() == 0.0 {
            write!(f, "{:.1}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}
