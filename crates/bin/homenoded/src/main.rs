//! # homenoded, the home node daemon
//!
//! Composition root that wires the adapters into the controller and runs it.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Install the tracing subscriber
//! - Generate the client identifier for this run
//! - Construct the adapters and hand them to the application services
//! - Run the controller until SIGINT/SIGTERM
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer. No domain logic belongs here.

mod config;

use anyhow::Context;
use homenode_adapter_mqtt::RumqttcSession;
use homenode_adapter_virtual::{VirtualActuator, VirtualLink, VirtualThermometer};
use homenode_app::command_router::CommandRouter;
use homenode_app::controller::Controller;
use homenode_app::services::actuator_bank::ActuatorBank;
use homenode_app::services::link_supervisor::LinkSupervisor;
use homenode_app::services::sensor_reader::SensorReader;
use homenode_app::services::session_supervisor::SessionSupervisor;
use homenode_domain::actuator::ActuatorKind;
use homenode_domain::id::ClientId;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.logging.filter).context("invalid log filter")?,
        )
        .init();

    let client_id = ClientId::generate(&config.mqtt.client_id_prefix);
    let broker = config.mqtt.broker_address();
    info!(%client_id, %broker, ssid = %config.link.ssid, "starting homenoded");

    let timings = config.timings();

    // Link and session
    let link = LinkSupervisor::new(VirtualLink::default(), config.credentials(), timings);
    let session = SessionSupervisor::new(
        RumqttcSession::new(config.mqtt.clone()),
        client_id,
        broker,
        timings.session_retry_delay,
    );

    // Devices
    let thermometer =
        VirtualThermometer::new(config.sensor.celsius).failing_every(config.sensor.fail_every);
    let actuators = ActuatorBank::new(
        VirtualActuator::new(ActuatorKind::Light),
        VirtualActuator::new(ActuatorKind::Fan),
        VirtualActuator::new(ActuatorKind::Climate),
    );
    let router = CommandRouter::new(
        SensorReader::new(thermometer),
        actuators,
        config.climate_policy(),
    );

    let mut controller = Controller::new(link, session, router, timings);

    tokio::select! {
        never = controller.run() => match never {},
        result = wait_for_shutdown_signal() => {
            result.context("failed to install signal handlers")?;
            info!("shutdown signal received, exiting");
        }
    }

    Ok(())
}

#[cfg(unix)]
async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = tokio::signal::ctrl_c() => result,
        _ = sigterm.recv() => Ok(()),
    }
}

#[cfg(not(unix))]
async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}
