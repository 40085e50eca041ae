//! [`MessagingSession`] over `rumqttc`.
//!
//! `rumqttc` only puts packets on the wire while its event loop is polled, so
//! every operation that must complete before returning drives the loop
//! itself: `connect` until `CONNACK`, `subscribe` until `SUBACK`.

use std::collections::VecDeque;

use homenode_app::error::SessionError;
use homenode_app::ports::{BrokerAddress, InboundMessage, MessagingSession};
use homenode_domain::id::ClientId;
use homenode_domain::topic::Topic;
use rumqttc::{
    AsyncClient, ConnectReturnCode, ConnectionError, Event, EventLoop, MqttOptions, Packet, QoS,
    SubscribeReasonCode,
};
use tokio::time::timeout;
use tracing::debug;

use crate::config::MqttConfig;
use crate::error::MqttError;

/// Capacity of the rumqttc request channel.
const REQUEST_CAPACITY: usize = 10;

struct Connection {
    client: AsyncClient,
    eventloop: EventLoop,
    /// Publishes that arrived while waiting for an acknowledgement.
    backlog: VecDeque<InboundMessage>,
}

impl Connection {
    /// Drive the event loop until the next inbound publish.
    async fn next_message(&mut self) -> Result<InboundMessage, MqttError> {
        loop {
            let event = self.eventloop.poll().await.map_err(MqttError::Connection)?;
            if let Some(message) = inbound_from_event(event)? {
                return Ok(message);
            }
        }
    }

    /// Drive the event loop until the broker acknowledges the pending
    /// subscription. Publishes seen meanwhile are kept for the next poll.
    async fn await_suback(&mut self, topic: &Topic) -> Result<(), MqttError> {
        loop {
            match self.eventloop.poll().await.map_err(MqttError::Connection)? {
                Event::Incoming(Packet::SubAck(ack)) => {
                    let granted = ack
                        .return_codes
                        .iter()
                        .all(|code| matches!(code, SubscribeReasonCode::Success(_)));
                    return if granted {
                        Ok(())
                    } else {
                        Err(MqttError::SubscriptionRejected(topic.to_string()))
                    };
                }
                event => {
                    if let Some(message) = inbound_from_event(event)? {
                        self.backlog.push_back(message);
                    }
                }
            }
        }
    }
}

/// A session to one broker. Each [`connect`](MessagingSession::connect)
/// builds a fresh client and event loop, so nothing of a previous session
/// survives.
///
/// Any failure of the event loop forgets the session: rumqttc would otherwise
/// reconnect behind our back with a clean session and no subscriptions.
pub struct RumqttcSession {
    config: MqttConfig,
    connection: Option<Connection>,
}

impl RumqttcSession {
    /// Create a disconnected session.
    #[must_use]
    pub fn new(config: MqttConfig) -> Self {
        Self {
            config,
            connection: None,
        }
    }

    /// Whether a session is currently open.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    fn options(&self, client_id: &ClientId, broker: &BrokerAddress) -> MqttOptions {
        let mut options = MqttOptions::new(client_id.as_str(), broker.host.clone(), broker.port);
        options.set_keep_alive(self.config.keep_alive());
        options.set_clean_session(true);
        options
    }

    fn client(&self) -> Result<AsyncClient, MqttError> {
        self.connection
            .as_ref()
            .map(|connection| connection.client.clone())
            .ok_or(MqttError::NotConnected)
    }

    /// Forget the session when `outcome` says the connection is gone.
    fn settle<T>(&mut self, outcome: Result<T, MqttError>) -> Result<T, MqttError> {
        if outcome.as_ref().is_err_and(MqttError::is_transport) {
            self.connection = None;
        }
        outcome
    }

    async fn open(&mut self, client_id: &ClientId, broker: &BrokerAddress) -> Result<(), MqttError> {
        self.connection = None;

        let (client, mut eventloop) =
            AsyncClient::new(self.options(client_id, broker), REQUEST_CAPACITY);

        let deadline = self.config.connect_timeout();
        timeout(deadline, wait_for_connack(&mut eventloop))
            .await
            .map_err(|_| MqttError::ConnectTimeout(deadline))??;

        self.connection = Some(Connection {
            client,
            eventloop,
            backlog: VecDeque::new(),
        });
        Ok(())
    }

    async fn subscribe_acked(&mut self, topic: &Topic) -> Result<(), MqttError> {
        let deadline = self.config.connect_timeout();
        let client = self.client()?;
        client
            .subscribe(topic.as_str(), QoS::AtMostOnce)
            .await
            .map_err(MqttError::Client)?;

        let connection = self.connection.as_mut().ok_or(MqttError::NotConnected)?;
        timeout(deadline, connection.await_suback(topic))
            .await
            .map_err(|_| MqttError::SubAckTimeout {
                topic: topic.to_string(),
                after: deadline,
            })?
    }

    async fn poll(&mut self) -> Result<Option<InboundMessage>, MqttError> {
        let window = self.config.poll_window();
        let connection = self.connection.as_mut().ok_or(MqttError::NotConnected)?;
        if let Some(message) = connection.backlog.pop_front() {
            return Ok(Some(message));
        }

        match timeout(window, connection.next_message()).await {
            Err(_elapsed) => Ok(None),
            Ok(message) => message.map(Some),
        }
    }
}

impl MessagingSession for RumqttcSession {
    async fn connect(
        &mut self,
        client_id: &ClientId,
        broker: &BrokerAddress,
    ) -> Result<(), SessionError> {
        Ok(self.open(client_id, broker).await?)
    }

    async fn subscribe(&mut self, topic: &Topic) -> Result<(), SessionError> {
        let outcome = self.subscribe_acked(topic).await;
        self.settle(outcome)?;
        debug!(%topic, "subscribed");
        Ok(())
    }

    async fn publish(&mut self, topic: &Topic, payload: &str) -> Result<(), SessionError> {
        let client = self.client()?;
        let outcome = client
            .publish(topic.as_str(), QoS::AtMostOnce, false, payload.as_bytes().to_vec())
            .await
            .map_err(MqttError::Client);
        Ok(self.settle(outcome)?)
    }

    async fn poll_once(&mut self) -> Result<Option<InboundMessage>, SessionError> {
        let outcome = self.poll().await;
        Ok(self.settle(outcome)?)
    }
}

/// Drive the event loop until the broker acknowledges the connection.
async fn wait_for_connack(eventloop: &mut EventLoop) -> Result<(), MqttError> {
    loop {
        let event = match eventloop.poll().await {
            Ok(event) => event,
            Err(ConnectionError::ConnectionRefused(code)) => return Err(MqttError::Refused(code)),
            Err(err) => return Err(MqttError::Connection(err)),
        };
        if let Event::Incoming(Packet::ConnAck(ack)) = event {
            return match ack.code {
                ConnectReturnCode::Success => Ok(()),
                code => Err(MqttError::Refused(code)),
            };
        }
    }
}

/// Extract the inbound message carried by `event`, if any.
///
/// A `CONNACK` after the session was established means the event loop
/// reconnected by itself with a clean session, so the caller must
/// re-subscribe.
fn inbound_from_event(event: Event) -> Result<Option<InboundMessage>, MqttError> {
    match event {
        Event::Incoming(Packet::Publish(publish)) => Ok(Some(InboundMessage {
            topic: publish.topic,
            payload: publish.payload.to_vec(),
        })),
        Event::Incoming(Packet::ConnAck(_)) => Err(MqttError::Reconnected),
        _ => Ok(None),
    }
}
