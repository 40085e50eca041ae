//! Virtual device implementations: actuator outputs and a thermometer.

mod actuator;
mod thermometer;

pub use actuator::{ActuatorHandle, VirtualActuator};
pub use thermometer::{ThermometerHandle, VirtualThermometer};
