//! Temperature sensor port.

use crate::error::SensorError;

/// A temperature probe with a sample-then-read protocol.
pub trait TemperatureSensor {
    /// Trigger a measurement.
    ///
    /// # Errors
    ///
    /// Returns [`SensorError`] if the probe does not produce a measurement.
    fn sample(&mut self) -> Result<(), SensorError>;

    /// Degrees Celsius from the last successful [`sample`](Self::sample).
    fn last_value(&self) -> f32;
}
