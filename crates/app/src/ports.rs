//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the hardware
//! or network. They are defined here (in `app`) so that both the services and
//! the adapter crates can depend on them without creating circular
//! dependencies.

pub mod actuator;
pub mod link;
pub mod sensor;
pub mod session;

pub use actuator::Actuator;
pub use link::{Credentials, NetworkLink};
pub use sensor::TemperatureSensor;
pub use session::{BrokerAddress, InboundMessage, MessagingSession, OutboundMessage};
