//! Network link port: the wireless station interface.
//!
//! The port carries no retry contract of its own: the
//! [`LinkSupervisor`](crate::services::link_supervisor::LinkSupervisor)
//! supplies all of it.

use std::fmt;

use crate::error::LinkError;

/// Station credentials for the access point.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub ssid: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("ssid", &self.ssid)
            .field("password", &"***")
            .finish()
    }
}

/// A wireless station interface.
pub trait NetworkLink {
    /// Power up the interface. Calling it on an active interface is a no-op.
    fn activate(&mut self);

    /// Start associating with an access point. Returns before the link is up;
    /// poll [`is_connected`](Self::is_connected) to observe completion.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Driver`] if the driver rejects the request.
    fn connect(&mut self, ssid: &str, password: &str) -> Result<(), LinkError>;

    /// Whether the station is associated and has an address.
    fn is_connected(&self) -> bool;

    /// Drop the association.
    fn disconnect(&mut self);

    /// The address assigned to the station, once connected.
    fn local_address(&self) -> Option<String>;
}
