//! Command router: maps each inbound message to exactly one effect.
//!
//! | Topic | Payload | Effect |
//! |-------|---------|--------|
//! | `home/light`, `home/fan` | `ON` / `OFF` | switch the output |
//! | `home/temperature/request` | ignored | read the sensor, publish the reading if there is one |
//! | `home/ac` | `ON` / `AUTO` | read the sensor, let the [`ClimatePolicy`] decide |
//! | `home/ac` | `OFF` | climate off, no reading needed |
//! | anything else | | log and drop |

use homenode_domain::actuator::{ActuatorKind, SwitchState};
use homenode_domain::climate::{ClimateMode, ClimatePolicy};
use homenode_domain::command::{Command, Unrecognized};
use homenode_domain::topic::Topic;
use tracing::{debug, info, warn};

use crate::ports::{Actuator, InboundMessage, OutboundMessage, TemperatureSensor};
use crate::services::actuator_bank::ActuatorBank;
use crate::services::sensor_reader::SensorReader;

/// What routing a message did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// An output was written.
    Actuated {
        actuator: ActuatorKind,
        state: SwitchState,
    },
    /// A reply must be published.
    Publish(OutboundMessage),
    /// The command needed a reading and the sensor had none.
    NoReading,
    /// The message mapped to nothing.
    Unrecognized,
}

/// Routes decoded commands to the sensor and the actuators.
pub struct CommandRouter<S, A> {
    sensor: SensorReader<S>,
    actuators: ActuatorBank<A>,
    policy: ClimatePolicy,
}

impl<S, A> CommandRouter<S, A>
where
    S: TemperatureSensor,
    A: Actuator,
{
    /// Create a router.
    pub fn new(sensor: SensorReader<S>, actuators: ActuatorBank<A>, policy: ClimatePolicy) -> Self {
        Self {
            sensor,
            actuators,
            policy,
        }
    }

    /// Route one message. Never fails: anything unusable is logged and dropped.
    pub fn route(&mut self, message: &InboundMessage) -> Dispatch {
        debug!(
            topic = %message.topic,
            payload = %String::from_utf8_lossy(&message.payload),
            "message received"
        );

        match Command::decode(&message.topic, &message.payload) {
            Command::Switch { actuator, state } => {
                info!(%actuator, %state, "switching output");
                self.actuators.set(actuator, state);
                Dispatch::Actuated { actuator, state }
            }
            Command::TemperatureRequest => self.answer_temperature(),
            Command::Climate(mode) => self.drive_climate(mode),
            Command::Unrecognized {
                topic,
                payload,
                reason,
            } => {
                match reason {
                    Unrecognized::Topic => warn!(%topic, "unrecognized topic"),
                    Unrecognized::Payload(err) => {
                        warn!(%topic, %payload, error = %err, "unrecognized command");
                    }
                }
                Dispatch::Unrecognized
            }
        }
    }

    fn answer_temperature(&mut self) -> Dispatch {
        let Some(reading) = self.sensor.read() else {
            return Dispatch::NoReading;
        };
        let payload = reading.response_payload();
        info!(%payload, "publishing temperature");
        Dispatch::Publish(OutboundMessage {
            topic: Topic::TemperatureResponse,
            payload,
        })
    }

    fn drive_climate(&mut self, mode: ClimateMode) -> Dispatch {
        let reading = if mode.needs_reading() {
            self.sensor.read()
        } else {
            None
        };

        let Some(state) = self.policy.decide(mode, reading) else {
            return Dispatch::NoReading;
        };

        let threshold = self.policy.threshold();
        match reading {
            None => info!("turning climate off"),
            Some(t) if state.is_on() => info!(
                %mode,
                celsius = %t,
                %threshold,
                "temperature above threshold, turning climate on"
            ),
            Some(t) => info!(
                %mode,
                celsius = %t,
                %threshold,
                "temperature not above threshold, denying climate request"
            ),
        }

        self.actuators.set(ActuatorKind::Climate, state);
        Dispatch::Actuated {
            actuator: ActuatorKind::Climate,
            state,
        }
    }

    /// Borrow the actuator bank.
    pub fn actuators(&self) -> &ActuatorBank<A> {
        &self.actuators
    }

    /// Borrow the sensor reader.
    pub fn sensor(&self) -> &SensorReader<S> {
        &self.sensor
    }
}
