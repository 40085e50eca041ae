//! Commands: inbound messages decoded once into a closed enum.

use crate::actuator::{ActuatorKind, SwitchState};
use crate::climate::ClimateMode;
use crate::error::PayloadError;
use crate::topic::Topic;

/// A decoded inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Drive a plain on/off actuator (light or fan).
    Switch {
        actuator: ActuatorKind,
        state: SwitchState,
    },
    /// Read the sensor and publish the result.
    TemperatureRequest,
    /// Drive the climate unit through the climate policy.
    Climate(ClimateMode),
    /// Anything that maps to no action. Logged and dropped.
    Unrecognized {
        topic: Topic,
        payload: String,
        reason: Unrecognized,
    },
}

/// Why a message produced no action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unrecognized {
    /// The topic is outside the inbound set.
    Topic,
    /// The topic is known but the payload is not.
    Payload(PayloadError),
}

impl Command {
    /// Decode a raw `(topic, payload)` pair.
    ///
    /// The temperature request ignores its payload, so it decodes even when
    /// the payload is not text.
    #[must_use]
    pub fn decode(topic: &str, payload: &[u8]) -> Self {
        match Topic::parse(topic) {
            Topic::TemperatureRequest => Self::TemperatureRequest,
            Topic::Light => Self::switch(ActuatorKind::Light, Topic::Light, payload),
            Topic::Fan => Self::switch(ActuatorKind::Fan, Topic::Fan, payload),
            Topic::Climate => match std::str::from_utf8(payload) {
                Ok(text) => match text.parse() {
                    Ok(mode) => Self::Climate(mode),
                    Err(err) => Self::unsupported(Topic::Climate, text, err),
                },
                Err(_) => Self::not_utf8(Topic::Climate, payload),
            },
            topic @ (Topic::TemperatureResponse | Topic::Unknown(_)) => Self::Unrecognized {
                topic,
                payload: String::from_utf8_lossy(payload).into_owned(),
                reason: Unrecognized::Topic,
            },
        }
    }

    fn switch(actuator: ActuatorKind, topic: Topic, payload: &[u8]) -> Self {
        let Ok(text) = std::str::from_utf8(payload) else {
            return Self::not_utf8(topic, payload);
        };
        match text.parse() {
            Ok(state) => Self::Switch { actuator, state },
            Err(err) => Self::unsupported(topic, text, err),
        }
    }

    fn not_utf8(topic: Topic, payload: &[u8]) -> Self {
        Self::Unrecognized {
            topic,
            payload: String::from_utf8_lossy(payload).into_owned(),
            reason: Unrecognized::Payload(PayloadError::NotUtf8),
        }
    }

    fn unsupported(topic: Topic, text: &str, err: PayloadError) -> Self {
        Self::Unrecognized {
            topic,
            payload: text.to_string(),
            reason: Unrecognized::Payload(err),
        }
    }
}
