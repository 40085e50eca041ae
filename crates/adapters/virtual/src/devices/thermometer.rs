//! Virtual thermometer: reports a settable temperature and can be told to
//! fail.

use std::sync::{Arc, Mutex};

use homenode_app::error::SensorError;
use homenode_app::ports::TemperatureSensor;
use tracing::debug;

use crate::error::VirtualError;
use crate::lock;

#[derive(Debug)]
struct Probe {
    celsius: f32,
    last: f32,
    samples: u64,
    fail_every: u64,
    fail_next: u32,
}

/// A simulated temperature probe.
///
/// `fail_every = n` makes every n-th sample fail (0 never fails), which is
/// how the daemon exercises the absent-reading path without hardware.
#[derive(Debug)]
pub struct VirtualThermometer {
    probe: Arc<Mutex<Probe>>,
}

/// Steers a [`VirtualThermometer`] after it was handed to the controller.
#[derive(Debug, Clone)]
pub struct ThermometerHandle {
    probe: Arc<Mutex<Probe>>,
}

impl VirtualThermometer {
    /// A probe reading `celsius` that never fails.
    #[must_use]
    pub fn new(celsius: f32) -> Self {
        Self {
            probe: Arc::new(Mutex::new(Probe {
                celsius,
                last: celsius,
                samples: 0,
                fail_every: 0,
                fail_next: 0,
            })),
        }
    }

    /// Fail every `n`-th sample. Zero disables periodic failures.
    #[must_use]
    pub fn failing_every(self, n: u64) -> Self {
        lock(&self.probe).fail_every = n;
        self
    }

    #[must_use]
    pub fn handle(&self) -> ThermometerHandle {
        ThermometerHandle {
            probe: Arc::clone(&self.probe),
        }
    }
}

impl TemperatureSensor for VirtualThermometer {
    fn sample(&mut self) -> Result<(), SensorError> {
        let mut probe = lock(&self.probe);
        probe.samples += 1;

        let periodic = probe.fail_every > 0 && probe.samples % probe.fail_every == 0;
        if probe.fail_next > 0 || periodic {
            probe.fail_next = probe.fail_next.saturating_sub(1);
            return Err(SensorError::Read(Box::new(VirtualError::ProbeSilent)));
        }

        probe.last = probe.celsius;
        debug!(celsius = probe.last, "thermometer sampled");
        Ok(())
    }

    fn last_value(&self) -> f32 {
        lock(&self.probe).last
    }
}

impl ThermometerHandle {
    /// Set the temperature the next successful sample will report.
    pub fn set_celsius(&self, celsius: f32) {
        lock(&self.probe).celsius = celsius;
    }

    /// Make the next `count` samples fail.
    pub fn fail_next(&self, count: u32) {
        lock(&self.probe).fail_next = count;
    }

    /// Number of samples taken so far.
    #[must_use]
    pub fn samples(&self) -> u64 {
        lock(&self.probe).samples
    }
}
