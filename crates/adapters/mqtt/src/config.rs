//! MQTT session configuration.

use std::time::Duration;

use homenode_app::ports::BrokerAddress;
use serde::Deserialize;

/// Configuration for the MQTT session.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MqttConfig {
    /// MQTT broker hostname or IP address.
    pub broker_host: String,
    /// MQTT broker port.
    pub broker_port: u16,
    /// Prefix of the generated client identifier.
    pub client_id_prefix: String,
    /// Keep-alive interval in seconds.
    pub keep_alive_secs: u16,
    /// How long to wait for the broker's `CONNACK`, in seconds.
    pub connect_timeout_secs: u16,
    /// How long one poll may wait for network activity, in milliseconds.
    pub poll_window_ms: u64,
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            broker_host: "broker.hivemq.com".to_string(),
            broker_port: 1883,
            client_id_prefix: "homenode-".to_string(),
            keep_alive_secs: 30,
            connect_timeout_secs: 10,
            poll_window_ms: 100,
        }
    }
}

impl MqttConfig {
    /// The broker to connect to.
    #[must_use]
    pub fn broker_address(&self) -> BrokerAddress {
        BrokerAddress {
            host: self.broker_host.clone(),
            port: self.broker_port,
        }
    }

    /// Keep-alive interval.
    #[must_use]
    pub fn keep_alive(&self) -> Duration {
        Duration::from_secs(u64::from(self.keep_alive_secs))
    }

    /// `CONNACK` deadline.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.connect_timeout_secs))
    }

    /// Poll window.
    #[must_use]
    pub fn poll_window(&self) -> Duration {
        Duration::from_millis(self.poll_window_ms)
    }
}
