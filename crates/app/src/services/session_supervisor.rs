//! Session supervisor: opens the broker session and re-subscribes.
//!
//! Called only once the link is up. Failures are assumed transient (broker
//! restart, network blip) and retried forever after a fixed delay.

use std::time::Duration;

use homenode_domain::id::ClientId;
use homenode_domain::topic::Topic;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::error::SessionError;
use crate::ports::{BrokerAddress, MessagingSession};

/// Outcome of [`SessionSupervisor::connect_session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionReady {
    /// Connect attempts it took, the successful one included.
    pub attempts: u32,
}

/// Owns the messaging session.
pub struct SessionSupervisor<M> {
    session: M,
    client_id: ClientId,
    broker: BrokerAddress,
    retry_delay: Duration,
}

impl<M: MessagingSession> SessionSupervisor<M> {
    /// Create a supervisor for `session`.
    pub fn new(session: M, client_id: ClientId, broker: BrokerAddress, retry_delay: Duration) -> Self {
        Self {
            session,
            client_id,
            broker,
            retry_delay,
        }
    }

    /// Connect and subscribe to every command topic, retrying until both succeed.
    ///
    /// Subscriptions never survive a reconnect, so they are always reissued.
    pub async fn connect_session(&mut self) -> SessionReady {
        let mut attempts = 0;
        loop {
            attempts += 1;
            info!(broker = %self.broker, attempt = attempts, "connecting to MQTT broker");
            match self.establish().await {
                Ok(()) => return SessionReady { attempts },
                Err(err) => warn!(
                    error = %err,
                    delay_secs = self.retry_delay.as_secs(),
                    "MQTT connection failed, retrying"
                ),
            }
            sleep(self.retry_delay).await;
        }
    }

    async fn establish(&mut self) -> Result<(), SessionError> {
        self.session.connect(&self.client_id, &self.broker).await?;
        info!(client_id = %self.client_id, "connected to MQTT broker");

        for topic in &Topic::SUBSCRIPTIONS {
            self.session.subscribe(topic).await?;
        }
        info!(count = Topic::SUBSCRIPTIONS.len(), "subscribed to topics");
        Ok(())
    }

    /// The client id presented to the broker.
    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Borrow the session.
    pub fn session(&self) -> &M {
        &self.session
    }

    /// Mutably borrow the session for polling and publishing.
    pub fn session_mut(&mut self) -> &mut M {
        &mut self.session
    }
}
