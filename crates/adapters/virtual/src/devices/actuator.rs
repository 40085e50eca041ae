//! Virtual actuator: a binary output that remembers its level.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use homenode_app::ports::Actuator;
use homenode_domain::actuator::{ActuatorKind, SwitchState};
use tracing::info;

#[derive(Debug, Default)]
struct Output {
    high: AtomicBool,
    writes: AtomicUsize,
}

/// A simulated output pin driving one appliance. Starts low.
#[derive(Debug)]
pub struct VirtualActuator {
    kind: ActuatorKind,
    output: Arc<Output>,
}

/// Read-only view of a [`VirtualActuator`]'s output.
#[derive(Debug, Clone)]
pub struct ActuatorHandle {
    kind: ActuatorKind,
    output: Arc<Output>,
}

impl VirtualActuator {
    /// Create the output for `kind`, initially off.
    #[must_use]
    pub fn new(kind: ActuatorKind) -> Self {
        Self {
            kind,
            output: Arc::default(),
        }
    }

    /// A handle observing this output.
    #[must_use]
    pub fn handle(&self) -> ActuatorHandle {
        ActuatorHandle {
            kind: self.kind,
            output: Arc::clone(&self.output),
        }
    }

    fn write(&self, state: SwitchState) {
        self.output.high.store(state.is_on(), Ordering::Relaxed);
        self.output.writes.fetch_add(1, Ordering::Relaxed);
        info!(actuator = %self.kind, %state, "output written");
    }
}

impl Actuator for VirtualActuator {
    fn set_on(&mut self) {
        self.write(SwitchState::On);
    }

    fn set_off(&mut self) {
        self.write(SwitchState::Off);
    }
}

impl ActuatorHandle {
    /// Which appliance this output drives.
    #[must_use]
    pub fn kind(&self) -> ActuatorKind {
        self.kind
    }

    /// Current output level.
    #[must_use]
    pub fn state(&self) -> SwitchState {
        SwitchState::from(self.output.high.load(Ordering::Relaxed))
    }

    #[must_use]
    pub fn is_on(&self) -> bool {
        self.state().is_on()
    }

    /// How many times the output was written, including writes that did not
    /// change the level.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.output.writes.load(Ordering::Relaxed)
    }
}
