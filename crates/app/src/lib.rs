//! # homenode-app
//!
//! Application layer: services and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement:
//!   - `NetworkLink`: the wireless station interface
//!   - `MessagingSession`: the publish/subscribe session to the broker
//!   - `TemperatureSensor`: the temperature probe
//!   - `Actuator`: one binary output
//! - Provide the services built on those ports:
//!   - `SensorReader` and `ActuatorBank` (leaves)
//!   - `LinkSupervisor` and `SessionSupervisor` (connection resilience)
//!   - `CommandRouter` (message dispatch and the climate policy)
//!   - `Controller` (the top-level poll loop)
//!
//! ## Concurrency
//! Everything runs on one logical thread. Retries are awaited sleeps inside
//! the single control flow and no task is ever spawned.
//!
//! ## Dependency rule
//! Depends on `homenode-domain` only (plus `tokio::time` for sleeping).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod command_router;
pub mod controller;
pub mod error;
pub mod ports;
pub mod services;
pub mod timing;
