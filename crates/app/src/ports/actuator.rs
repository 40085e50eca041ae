//! Actuator port: one binary output.

use homenode_domain::actuator::SwitchState;

/// A binary output. Writes are fire-and-forget and never read back.
pub trait Actuator {
    /// Drive the output high.
    fn set_on(&mut self);

    /// Drive the output low.
    fn set_off(&mut self);

    /// Drive the output to `state`.
    fn set(&mut self, state: SwitchState) {
        match state {
            SwitchState::On => self.set_on(),
            SwitchState::Off => self.set_off(),
        }
    }
}
