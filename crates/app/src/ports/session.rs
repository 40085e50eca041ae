//! Messaging session port: the publish/subscribe connection to the broker.
//!
//! Inbound messages are returned from [`MessagingSession::poll_once`] rather
//! than pushed into a registered callback. The caller routes each message
//! before polling again, so handling always happens inside the poll step and
//! never concurrently with it.

use std::fmt;
use std::future::Future;

use homenode_domain::id::ClientId;
use homenode_domain::topic::Topic;

use crate::error::SessionError;

/// Where the broker listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerAddress {
    pub host: String,
    pub port: u16,
}

impl fmt::Display for BrokerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// A message as delivered by the broker, before decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub topic: String,
    pub payload: Vec<u8>,
}

impl InboundMessage {
    /// Build a message from anything string- and byte-like.
    pub fn new(topic: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            topic: topic.into(),
            payload: payload.into(),
        }
    }
}

/// A message the device publishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub topic: Topic,
    pub payload: String,
}

/// A publish/subscribe session.
pub trait MessagingSession {
    /// Open a fresh session, replacing any previous one. Subscriptions of a
    /// previous session do not carry over.
    fn connect(
        &mut self,
        client_id: &ClientId,
        broker: &BrokerAddress,
    ) -> impl Future<Output = Result<(), SessionError>> + Send;

    /// Subscribe to `topic` on the current session.
    fn subscribe(&mut self, topic: &Topic) -> impl Future<Output = Result<(), SessionError>> + Send;

    /// Publish `payload` on `topic`, fire-and-forget.
    fn publish(
        &mut self,
        topic: &Topic,
        payload: &str,
    ) -> impl Future<Output = Result<(), SessionError>> + Send;

    /// Service the connection once and return at most one inbound message.
    ///
    /// Returns `Ok(None)` when nothing arrived. Must not block for longer
    /// than a short, adapter-defined window.
    fn poll_once(
        &mut self,
    ) -> impl Future<Output = Result<Option<InboundMessage>, SessionError>> + Send;
}
