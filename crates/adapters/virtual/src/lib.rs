//! # homenode-adapter-virtual
//!
//! Simulated hardware for running the controller on a host.
//!
//! ## Provided adapters
//!
//! | Adapter | Port | Behaviour |
//! |---------|------|-----------|
//! | [`VirtualLink`] | `NetworkLink` | Associates after a configurable delay; can be dropped or made unreachable |
//! | [`VirtualThermometer`] | `TemperatureSensor` | Reports a settable temperature; can fail on demand |
//! | [`VirtualActuator`] | `Actuator` | Records its output level |
//! | [`LoopbackSession`] | `MessagingSession` | In-memory broker: inject inbound messages and faults, inspect publishes |
//!
//! Every adapter hands out a cloneable handle sharing its state, so a test
//! (or the daemon) can steer it after moving the adapter into the controller.
//!
//! ## Dependency rule
//!
//! Depends on `homenode-app` (port traits) and `homenode-domain` only.

mod devices;
pub mod error;
mod link;
mod loopback;

pub use devices::{ActuatorHandle, ThermometerHandle, VirtualActuator, VirtualThermometer};
pub use error::VirtualError;
pub use link::{LinkHandle, VirtualLink};
pub use loopback::{Fault, LoopbackHandle, LoopbackSession};

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock shared adapter state, recovering it if a holder panicked.
fn lock<T>(state: &Mutex<T>) -> MutexGuard<'_, T> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
