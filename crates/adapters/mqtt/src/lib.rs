//! # homenode-adapter-mqtt
//!
//! MQTT adapter: implements the `MessagingSession` port on top of `rumqttc`.
//!
//! ## Responsibilities
//! - Open a clean session to the broker and wait for its `CONNACK`
//! - Subscribe and publish with QoS 0, like the device firmware does
//! - Drive the `rumqttc` event loop for a short window per poll and hand
//!   back at most one inbound publish
//! - Classify connection errors into transport faults and other faults
//!
//! ## Dependency rule
//! Same as other adapters: depends on `homenode-app` and `homenode-domain`.

pub mod config;
pub mod error;
pub mod session;

pub use config::MqttConfig;
pub use error::MqttError;
pub use session::RumqttcSession;
