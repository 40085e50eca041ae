//! Virtual wireless station.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use homenode_app::error::LinkError;
use homenode_app::ports::NetworkLink;
use tokio::time::Instant;
use tracing::debug;

use crate::error::VirtualError;
use crate::lock;

/// Address handed out when none is configured.
const DEFAULT_ADDRESS: &str = "10.0.0.2";

#[derive(Debug)]
struct Station {
    active: bool,
    associating_since: Option<Instant>,
    reachable: bool,
    reject_next: u32,
    connects: u32,
    disconnects: u32,
}

/// A station that associates `association_delay` after a connect request,
/// as long as the access point is reachable.
#[derive(Debug)]
pub struct VirtualLink {
    address: String,
    association_delay: Duration,
    station: Arc<Mutex<Station>>,
}

/// Steers a [`VirtualLink`] after it was handed to the controller.
#[derive(Debug, Clone)]
pub struct LinkHandle {
    station: Arc<Mutex<Station>>,
}

impl Default for VirtualLink {
    fn default() -> Self {
        Self::new(DEFAULT_ADDRESS)
    }
}

impl VirtualLink {
    /// A station that associates immediately and reports `address`.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            association_delay: Duration::ZERO,
            station: Arc::new(Mutex::new(Station {
                active: false,
                associating_since: None,
                reachable: true,
                reject_next: 0,
                connects: 0,
                disconnects: 0,
            })),
        }
    }

    /// Delay between a connect request and the link coming up.
    #[must_use]
    pub fn with_association_delay(mut self, delay: Duration) -> Self {
        self.association_delay = delay;
        self
    }

    #[must_use]
    pub fn handle(&self) -> LinkHandle {
        LinkHandle {
            station: Arc::clone(&self.station),
        }
    }
}

impl NetworkLink for VirtualLink {
    fn activate(&mut self) {
        lock(&self.station).active = true;
    }

    fn connect(&mut self, ssid: &str, _password: &str) -> Result<(), LinkError> {
        let mut station = lock(&self.station);
        if !station.active || station.reject_next > 0 {
            station.reject_next = station.reject_next.saturating_sub(1);
            return Err(LinkError::Driver(Box::new(
                VirtualError::AssociationRejected,
            )));
        }

        station.connects += 1;
        station.associating_since = Some(Instant::now());
        debug!(%ssid, "association requested");
        Ok(())
    }

    fn is_connected(&self) -> bool {
        let station = lock(&self.station);
        station.active
            && station.reachable
            && station
                .associating_since
                .is_some_and(|since| since.elapsed() >= self.association_delay)
    }

    fn disconnect(&mut self) {
        let mut station = lock(&self.station);
        station.associating_since = None;
        station.disconnects += 1;
    }

    fn local_address(&self) -> Option<String> {
        self.is_connected().then(|| self.address.clone())
    }
}

impl LinkHandle {
    /// The access point drops the station. It stays down until the next
    /// connect request.
    pub fn drop_link(&self) {
        lock(&self.station).associating_since = None;
    }

    /// Make the access point (un)reachable. While unreachable, associations
    /// never complete.
    pub fn set_reachable(&self, reachable: bool) {
        lock(&self.station).reachable = reachable;
    }

    /// Reject the next `count` connect requests with a driver error.
    pub fn reject_next(&self, count: u32) {
        lock(&self.station).reject_next = count;
    }

    /// Number of accepted connect requests.
    #[must_use]
    pub fn connects(&self) -> u32 {
        lock(&self.station).connects
    }

    #[must_use]
    pub fn disconnects(&self) -> u32 {
        lock(&self.station).disconnects
    }
}
