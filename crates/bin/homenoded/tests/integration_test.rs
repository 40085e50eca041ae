//! End-to-end tests for the full homenoded stack.
//!
//! Each test wires the real application services to the virtual link,
//! thermometer and actuators and to the in-memory loopback session, then
//! drives the controller step by step on tokio's paused clock. No socket is
//! opened.

use std::time::Duration;

use homenode_adapter_virtual::{
    ActuatorHandle, Fault, LinkHandle, LoopbackHandle, LoopbackSession, ThermometerHandle,
    VirtualActuator, VirtualLink, VirtualThermometer,
};
use homenode_app::command_router::CommandRouter;
use homenode_app::controller::{Controller, Phase};
use homenode_app::ports::{BrokerAddress, Credentials, OutboundMessage};
use homenode_app::services::actuator_bank::ActuatorBank;
use homenode_app::services::link_supervisor::LinkSupervisor;
use homenode_app::services::sensor_reader::SensorReader;
use homenode_app::services::session_supervisor::SessionSupervisor;
use homenode_app::timing::Timings;
use homenode_domain::actuator::ActuatorKind;
use homenode_domain::climate::ClimatePolicy;
use homenode_domain::id::ClientId;
use homenode_domain::topic::Topic;
use tokio::time::Instant;

type Node = Controller<VirtualLink, LoopbackSession, VirtualThermometer, VirtualActuator>;

struct Rig {
    node: Node,
    link: LinkHandle,
    broker: LoopbackHandle,
    thermometer: ThermometerHandle,
    light: ActuatorHandle,
    fan: ActuatorHandle,
    climate: ActuatorHandle,
}

/// Build a node whose thermometer reads `celsius`.
fn rig(celsius: f32) -> Rig {
    let timings = Timings::default();

    let link = VirtualLink::new("192.168.1.50");
    let session = LoopbackSession::new();
    let thermometer = VirtualThermometer::new(celsius);
    let light = VirtualActuator::new(ActuatorKind::Light);
    let fan = VirtualActuator::new(ActuatorKind::Fan);
    let climate = VirtualActuator::new(ActuatorKind::Climate);

    let handles = (
        link.handle(),
        session.handle(),
        thermometer.handle(),
        light.handle(),
        fan.handle(),
        climate.handle(),
    );

    let node = Controller::new(
        LinkSupervisor::new(
            link,
            Credentials {
                ssid: "Wokwi-GUEST".to_string(),
                password: String::new(),
            },
            timings,
        ),
        SessionSupervisor::new(
            session,
            ClientId::generate("homenode-"),
            BrokerAddress {
                host: "broker.hivemq.com".to_string(),
                port: 1883,
            },
            timings.session_retry_delay,
        ),
        CommandRouter::new(
            SensorReader::new(thermometer),
            ActuatorBank::new(light, fan, climate),
            ClimatePolicy::default(),
        ),
        timings,
    );

    Rig {
        node,
        link: handles.0,
        broker: handles.1,
        thermometer: handles.2,
        light: handles.3,
        fan: handles.4,
        climate: handles.5,
    }
}

/// Build a node and bring it to the polling phase.
async fn started(celsius: f32) -> Rig {
    let mut rig = rig(celsius);
    rig.node.start().await;
    assert_eq!(rig.node.phase(), Phase::Polling);
    rig
}

/// Deliver one message and let the node service it.
async fn deliver(rig: &mut Rig, topic: &str, payload: &str) {
    rig.broker.inject(topic, payload);
    assert_eq!(rig.node.step().await, Phase::Polling);
    assert_eq!(rig.broker.pending(), 0);
}

// ---------------------------------------------------------------------------
// Startup
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn should_subscribe_to_all_command_topics_on_startup() {
    let rig = started(22.0).await;

    assert_eq!(rig.link.connects(), 1);
    assert_eq!(rig.broker.connects(), 1);
    assert_eq!(rig.broker.subscriptions(), Topic::SUBSCRIPTIONS.to_vec());
}

#[tokio::test(start_paused = true)]
async fn should_present_prefixed_client_id() {
    let rig = started(22.0).await;

    let ids = rig.broker.client_ids();
    assert_eq!(ids.len(), 1);
    assert!(ids[0].as_str().starts_with("homenode-"));
    assert_eq!(ids[0].as_str().len(), "homenode-".len() + 8);
}

#[tokio::test(start_paused = true)]
async fn should_retry_session_until_broker_accepts() {
    let mut rig = rig(22.0);
    rig.broker.refuse_next(2);

    let begin = Instant::now();
    rig.node.start().await;

    assert_eq!(rig.broker.connects(), 1);
    assert!(begin.elapsed() >= Duration::from_secs(10));
    assert_eq!(rig.broker.subscriptions(), Topic::SUBSCRIPTIONS.to_vec());
}

#[tokio::test(start_paused = true)]
async fn should_retry_link_after_driver_rejection() {
    let mut rig = rig(22.0);
    rig.link.reject_next(1);

    let begin = Instant::now();
    rig.node.start().await;

    assert_eq!(rig.link.connects(), 1);
    assert!(begin.elapsed() >= Duration::from_secs(5));
}

#[tokio::test(start_paused = true)]
async fn should_time_out_link_attempt_while_access_point_unreachable() {
    let mut rig = rig(22.0);
    let link = rig.link.clone();
    link.set_reachable(false);

    tokio::join!(rig.node.start(), async {
        tokio::time::sleep(Duration::from_secs(30)).await;
        link.set_reachable(true);
    });

    assert_eq!(rig.node.phase(), Phase::Polling);
    assert_eq!(rig.link.disconnects(), 1);
    assert_eq!(rig.link.connects(), 2);
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn should_switch_light_on_then_off() {
    let mut rig = started(22.0).await;

    deliver(&mut rig, "home/light", "ON").await;
    assert!(rig.light.is_on());

    deliver(&mut rig, "home/light", "OFF").await;
    assert!(!rig.light.is_on());
    assert!(rig.broker.published().is_empty());
}

#[tokio::test(start_paused = true)]
async fn should_switch_fan_independently_of_light() {
    let mut rig = started(22.0).await;

    deliver(&mut rig, "home/fan", "ON").await;

    assert!(rig.fan.is_on());
    assert!(!rig.light.is_on());
}

#[tokio::test(start_paused = true)]
async fn should_ignore_invalid_switch_payload() {
    let mut rig = started(22.0).await;
    deliver(&mut rig, "home/light", "ON").await;

    deliver(&mut rig, "home/light", "on").await;
    deliver(&mut rig, "home/light", "TOGGLE").await;

    assert!(rig.light.is_on());
    assert_eq!(rig.light.writes(), 1);
}

#[tokio::test(start_paused = true)]
async fn should_turn_climate_on_in_auto_mode_when_hot() {
    let mut rig = started(26.5).await;

    deliver(&mut rig, "home/ac", "AUTO").await;

    assert!(rig.climate.is_on());
}

#[tokio::test(start_paused = true)]
async fn should_turn_climate_off_when_cool() {
    let mut rig = started(26.5).await;
    deliver(&mut rig, "home/ac", "ON").await;
    assert!(rig.climate.is_on());

    rig.thermometer.set_celsius(20.0);
    deliver(&mut rig, "home/ac", "ON").await;

    assert!(!rig.climate.is_on());
}

#[tokio::test(start_paused = true)]
async fn should_keep_climate_off_at_threshold() {
    let mut rig = started(25.0).await;

    deliver(&mut rig, "home/ac", "AUTO").await;

    assert!(!rig.climate.is_on());
    assert_eq!(rig.climate.writes(), 1);
}

#[tokio::test(start_paused = true)]
async fn should_turn_climate_off_without_reading_sensor() {
    let mut rig = started(30.0).await;
    deliver(&mut rig, "home/ac", "ON").await;
    let samples = rig.thermometer.samples();

    deliver(&mut rig, "home/ac", "OFF").await;

    assert!(!rig.climate.is_on());
    assert_eq!(rig.thermometer.samples(), samples);
}

#[tokio::test(start_paused = true)]
async fn should_leave_climate_untouched_when_sensor_fails() {
    let mut rig = started(30.0).await;
    rig.thermometer.fail_next(1);

    deliver(&mut rig, "home/ac", "AUTO").await;

    assert_eq!(rig.climate.writes(), 0);
}

#[tokio::test(start_paused = true)]
async fn should_publish_temperature_on_request() {
    let mut rig = started(22.0).await;

    deliver(&mut rig, "home/temperature/request", "").await;

    assert_eq!(
        rig.broker.published(),
        vec![OutboundMessage {
            topic: Topic::TemperatureResponse,
            payload: "Temperature: 22.0\u{b0}C".to_string(),
        }]
    );
}

#[tokio::test(start_paused = true)]
async fn should_publish_nothing_when_sensor_fails() {
    let mut rig = started(22.0).await;
    rig.thermometer.fail_next(1);

    deliver(&mut rig, "home/temperature/request", "").await;

    assert!(rig.broker.published().is_empty());
    assert_eq!(rig.node.phase(), Phase::Polling);
}

#[tokio::test(start_paused = true)]
async fn should_ignore_unknown_topic() {
    let mut rig = started(22.0).await;

    deliver(&mut rig, "home/garage", "ON").await;

    assert!(!rig.light.is_on());
    assert!(!rig.fan.is_on());
    assert!(!rig.climate.is_on());
    assert!(rig.broker.published().is_empty());
}

// ---------------------------------------------------------------------------
// Faults
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn should_resubscribe_after_transport_fault() {
    let mut rig = started(22.0).await;
    rig.broker.inject_fault(Fault::ConnectionLost);

    assert_eq!(rig.node.step().await, Phase::SessionDown);
    assert_eq!(rig.node.step().await, Phase::Polling);

    assert_eq!(rig.broker.connects(), 2);
    assert_eq!(rig.link.connects(), 1);
    assert_eq!(rig.broker.subscriptions(), Topic::SUBSCRIPTIONS.to_vec());

    deliver(&mut rig, "home/light", "ON").await;
    assert!(rig.light.is_on());
}

#[tokio::test(start_paused = true)]
async fn should_rejoin_link_before_session_when_link_lost() {
    let mut rig = started(22.0).await;
    rig.link.drop_link();
    rig.broker.inject_fault(Fault::ConnectionLost);

    assert_eq!(rig.node.step().await, Phase::LinkDown);
    rig.node.start().await;

    assert_eq!(rig.link.connects(), 2);
    assert_eq!(rig.broker.connects(), 2);
    assert_eq!(rig.broker.subscriptions(), Topic::SUBSCRIPTIONS.to_vec());
}

#[tokio::test(start_paused = true)]
async fn should_keep_session_after_protocol_fault() {
    let mut rig = started(22.0).await;
    rig.broker.inject_fault(Fault::Malformed);

    let begin = Instant::now();
    assert_eq!(rig.node.step().await, Phase::Polling);
    assert!(begin.elapsed() >= Duration::from_secs(5));

    assert_eq!(rig.broker.connects(), 1);
    deliver(&mut rig, "home/fan", "ON").await;
    assert!(rig.fan.is_on());
}

#[tokio::test(start_paused = true)]
async fn should_keep_actuator_state_across_reconnect() {
    let mut rig = started(22.0).await;
    deliver(&mut rig, "home/light", "ON").await;

    rig.broker.inject_fault(Fault::ConnectionLost);
    rig.node.step().await;
    rig.node.start().await;

    assert!(rig.light.is_on());
}
