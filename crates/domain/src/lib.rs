//! # homenode-domain
//!
//! Pure domain model for the homenode device controller.
//!
//! ## Responsibilities
//! - The fixed set of MQTT **topics** the device listens and answers on
//! - Decoding inbound messages into **commands** (one closed enum, resolved once)
//! - **Switch states** for the binary actuators (light, fan, climate)
//! - **Temperature** readings and their wire rendering
//! - The **climate policy** that gates a user request on the live reading
//! - The session **client id**
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod actuator;
pub mod climate;
pub mod command;
pub mod temperature;
pub mod topic;
