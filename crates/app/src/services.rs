//! Application services: the building blocks the controller drives.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod actuator_bank;
pub mod link_supervisor;
pub mod sensor_reader;
pub mod session_supervisor;
