//! In-memory loopback session.
//!
//! Plays the broker's part: messages injected through the [`LoopbackHandle`]
//! come back out of [`poll_once`](MessagingSession::poll_once) one at a time,
//! and everything the device publishes is recorded.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use homenode_app::error::SessionError;
use homenode_app::ports::{BrokerAddress, InboundMessage, MessagingSession, OutboundMessage};
use homenode_domain::id::ClientId;
use homenode_domain::topic::Topic;
use tracing::debug;

use crate::error::VirtualError;
use crate::lock;

/// A fault the next poll reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// The connection drops. The session is gone until the next connect.
    ConnectionLost,
    /// The broker sends garbage but the connection survives.
    Malformed,
}

#[derive(Debug, Default)]
struct Broker {
    connected: bool,
    connects: u32,
    refuse_next: u32,
    client_ids: Vec<ClientId>,
    subscriptions: Vec<Topic>,
    inbox: VecDeque<InboundMessage>,
    faults: VecDeque<Fault>,
    published: Vec<OutboundMessage>,
}

/// A [`MessagingSession`] backed by shared memory instead of a network.
#[derive(Debug, Default)]
pub struct LoopbackSession {
    broker: Arc<Mutex<Broker>>,
}

/// Drives a [`LoopbackSession`] from the broker's side.
#[derive(Debug, Clone)]
pub struct LoopbackHandle {
    broker: Arc<Mutex<Broker>>,
}

impl LoopbackSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn handle(&self) -> LoopbackHandle {
        LoopbackHandle {
            broker: Arc::clone(&self.broker),
        }
    }
}

impl MessagingSession for LoopbackSession {
    async fn connect(
        &mut self,
        client_id: &ClientId,
        broker: &BrokerAddress,
    ) -> Result<(), SessionError> {
        let mut state = lock(&self.broker);
        state.connected = false;
        if state.refuse_next > 0 {
            state.refuse_next -= 1;
            return Err(SessionError::Transport(Box::new(
                VirtualError::BrokerUnreachable,
            )));
        }

        state.connected = true;
        state.connects += 1;
        state.subscriptions.clear();
        state.client_ids.push(client_id.clone());
        debug!(%client_id, %broker, "loopback session opened");
        Ok(())
    }

    async fn subscribe(&mut self, topic: &Topic) -> Result<(), SessionError> {
        let mut state = lock(&self.broker);
        if !state.connected {
            return Err(SessionError::NotConnected);
        }
        state.subscriptions.push(topic.clone());
        Ok(())
    }

    async fn publish(&mut self, topic: &Topic, payload: &str) -> Result<(), SessionError> {
        let mut state = lock(&self.broker);
        if !state.connected {
            return Err(SessionError::NotConnected);
        }
        state.published.push(OutboundMessage {
            topic: topic.clone(),
            payload: payload.to_owned(),
        });
        Ok(())
    }

    async fn poll_once(&mut self) -> Result<Option<InboundMessage>, SessionError> {
        let mut state = lock(&self.broker);
        if !state.connected {
            return Err(SessionError::NotConnected);
        }

        match state.faults.pop_front() {
            Some(Fault::ConnectionLost) => {
                state.connected = false;
                Err(SessionError::Transport(Box::new(
                    VirtualError::ConnectionReset,
                )))
            }
            Some(Fault::Malformed) => Err(SessionError::Protocol(Box::new(
                VirtualError::MalformedPacket,
            ))),
            None => Ok(state.inbox.pop_front()),
        }
    }
}

impl LoopbackHandle {
    /// Queue a message for delivery to the device.
    pub fn inject(&self, topic: impl Into<String>, payload: impl Into<Vec<u8>>) {
        lock(&self.broker)
            .inbox
            .push_back(InboundMessage::new(topic, payload));
    }

    /// Queue a fault. Faults are reported before any pending message.
    pub fn inject_fault(&self, fault: Fault) {
        lock(&self.broker).faults.push_back(fault);
    }

    /// Refuse the next `count` connect attempts.
    pub fn refuse_next(&self, count: u32) {
        lock(&self.broker).refuse_next = count;
    }

    /// Whether a session is open.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        lock(&self.broker).connected
    }

    /// Number of sessions opened so far.
    #[must_use]
    pub fn connects(&self) -> u32 {
        lock(&self.broker).connects
    }

    /// Client ids presented on each successful connect, in order.
    #[must_use]
    pub fn client_ids(&self) -> Vec<ClientId> {
        lock(&self.broker).client_ids.clone()
    }

    /// Subscriptions of the current session, in the order they were made.
    #[must_use]
    pub fn subscriptions(&self) -> Vec<Topic> {
        lock(&self.broker).subscriptions.clone()
    }

    /// Everything published so far, oldest first.
    #[must_use]
    pub fn published(&self) -> Vec<OutboundMessage> {
        lock(&self.broker).published.clone()
    }

    /// Messages injected but not yet delivered.
    #[must_use]
    pub fn pending(&self) -> usize {
        lock(&self.broker).inbox.len()
    }
}
