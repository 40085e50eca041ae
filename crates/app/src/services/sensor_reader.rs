//! Sensor reader: turns the probe's fallible protocol into an optional reading.

use homenode_domain::temperature::Temperature;
use tracing::{debug, warn};

use crate::error::SensorError;
use crate::ports::TemperatureSensor;

/// Wraps the single temperature probe.
///
/// Every call samples afresh: there is no caching and no smoothing.
pub struct SensorReader<S> {
    sensor: S,
}

impl<S: TemperatureSensor> SensorReader<S> {
    /// Create a reader over `sensor`.
    pub fn new(sensor: S) -> Self {
        Self { sensor }
    }

    /// Sample the probe.
    ///
    /// A failed sample is logged and reported as `None`; callers treat an
    /// absent reading as a normal outcome.
    pub fn read(&mut self) -> Option<Temperature> {
        match self.try_read() {
            Ok(reading) => {
                debug!(celsius = %reading, "temperature sampled");
                Some(reading)
            }
            Err(err) => {
                warn!(error = %err, "failed to read temperature");
                None
            }
        }
    }

    fn try_read(&mut self) -> Result<Temperature, SensorError> {
        self.sensor.sample()?;
        let value = self.sensor.last_value();
        if !value.is_finite() {
            return Err(SensorError::Implausible(value));
        }
        Ok(Temperature::celsius(value))
    }

    /// Borrow the wrapped probe.
    pub fn sensor(&self) -> &S {
        &self.sensor
    }
}
