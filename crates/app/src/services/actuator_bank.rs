//! Actuator bank: the named binary outputs.

use homenode_domain::actuator::{ActuatorKind, SwitchState};
use tracing::debug;

use crate::ports::Actuator;

/// Owns the light, fan and climate outputs.
pub struct ActuatorBank<A> {
    light: A,
    fan: A,
    climate: A,
}

impl<A: Actuator> ActuatorBank<A> {
    /// Create a bank from its three outputs.
    pub fn new(light: A, fan: A, climate: A) -> Self {
        Self {
            light,
            fan,
            climate,
        }
    }

    /// Drive one output to `state`.
    pub fn set(&mut self, kind: ActuatorKind, state: SwitchState) {
        debug!(actuator = %kind, %state, "writing output");
        self.output_mut(kind).set(state);
    }

    /// Borrow one output.
    pub fn output(&self, kind: ActuatorKind) -> &A {
        match kind {
            ActuatorKind::Light => &self.light,
            ActuatorKind::Fan => &self.fan,
            ActuatorKind::Climate => &self.climate,
        }
    }

    fn output_mut(&mut self, kind: ActuatorKind) -> &mut A {
        match kind {
            ActuatorKind::Light => &mut self.light,
            ActuatorKind::Fan => &mut self.fan,
            ActuatorKind::Climate => &mut self.climate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Pin {
        high: bool,
        writes: usize,
    }

    impl Actuator for Pin {
        fn set_on(&mut self) {
            self.high = true;
            self.writes += 1;
        }

        fn set_off(&mut self) {
            self.high = false;
            self.writes += 1;
        }
    }

    fn bank() -> ActuatorBank<Pin> {
        ActuatorBank::new(Pin::default(), Pin::default(), Pin::default())
    }

    #[test]
    fn should_drive_only_the_named_output() {
        let mut bank = bank();
        bank.set(ActuatorKind::Fan, SwitchState::On);
        assert!(bank.output(ActuatorKind::Fan).high);
        assert!(!bank.output(ActuatorKind::Light).high);
        assert!(!bank.output(ActuatorKind::Climate).high);
    }

    #[test]
    fn should_switch_output_off() {
        let mut bank = bank();
        bank.set(ActuatorKind::Climate, SwitchState::On);
        bank.set(ActuatorKind::Climate, SwitchState::Off);
        assert!(!bank.output(ActuatorKind::Climate).high);
    }

    #[test]
    fn should_write_even_when_state_is_unchanged() {
        let mut bank = bank();
        bank.set(ActuatorKind::Light, SwitchState::On);
        bank.set(ActuatorKind::Light, SwitchState::On);
        assert!(bank.output(ActuatorKind::Light).high);
        assert_eq!(bank.output(ActuatorKind::Light).writes, 2);
    }
}
