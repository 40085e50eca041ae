//! Controller: the top-level poll loop.
//!
//! ```text
//! LinkDown ──ensure_link_up──▶ SessionDown ──connect_session──▶ Polling ─┐
//!    ▲                              ▲                                     │
//!    └──── transport fault, link lost ──── transport fault ◀──────────────┘
//! ```
//!
//! Other poll faults are logged and polling resumes after a pause on the
//! same session. The loop never ends on its own.

use std::convert::Infallible;

use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::command_router::{CommandRouter, Dispatch};
use crate::error::SessionError;
use crate::ports::{Actuator, MessagingSession, NetworkLink, TemperatureSensor};
use crate::services::link_supervisor::LinkSupervisor;
use crate::services::session_supervisor::SessionSupervisor;
use crate::timing::Timings;

/// Where the controller is in its connection lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The link must be (re-)established.
    LinkDown,
    /// The link is up; the session must be (re-)established and subscribed.
    SessionDown,
    /// Subscribed; servicing inbound messages.
    Polling,
}

/// Owns every collaborator and drives them from one control flow.
pub struct Controller<L, M, S, A> {
    link: LinkSupervisor<L>,
    session: SessionSupervisor<M>,
    router: CommandRouter<S, A>,
    timings: Timings,
    phase: Phase,
}

impl<L, M, S, A> Controller<L, M, S, A>
where
    L: NetworkLink,
    M: MessagingSession,
    S: TemperatureSensor,
    A: Actuator,
{
    /// Create a controller starting in [`Phase::LinkDown`].
    pub fn new(
        link: LinkSupervisor<L>,
        session: SessionSupervisor<M>,
        router: CommandRouter<S, A>,
        timings: Timings,
    ) -> Self {
        Self {
            link,
            session,
            router,
            timings,
            phase: Phase::LinkDown,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Run forever.
    pub async fn run(&mut self) -> Infallible {
        loop {
            self.step().await;
        }
    }

    /// Step until the controller is polling.
    pub async fn start(&mut self) {
        while self.phase != Phase::Polling {
            self.step().await;
        }
    }

    /// Perform one transition from the current phase and return the new one.
    pub async fn step(&mut self) -> Phase {
        self.phase = match self.phase {
            Phase::LinkDown => {
                self.link.ensure_link_up().await;
                Phase::SessionDown
            }
            Phase::SessionDown => {
                self.session.connect_session().await;
                info!("listening for commands");
                Phase::Polling
            }
            Phase::Polling => self.poll().await,
        };
        self.phase
    }

    async fn poll(&mut self) -> Phase {
        match self.service_inbound().await {
            Ok(_) => {
                sleep(self.timings.poll_interval).await;
                Phase::Polling
            }
            Err(err) if err.is_transport() => {
                warn!(error = %err, "session lost, reconnecting");
                sleep(self.timings.fault_pause).await;
                if self.link.is_up() {
                    Phase::SessionDown
                } else {
                    warn!("wi-fi link lost");
                    Phase::LinkDown
                }
            }
            Err(err) => {
                error!(error = %err, "poll failed");
                sleep(self.timings.fault_pause).await;
                Phase::Polling
            }
        }
    }

    /// Poll once and route whatever arrived before returning.
    async fn service_inbound(&mut self) -> Result<Option<Dispatch>, SessionError> {
        let Some(message) = self.session.session_mut().poll_once().await? else {
            return Ok(None);
        };

        let dispatch = self.router.route(&message);
        if let Dispatch::Publish(reply) = &dispatch {
            self.session
                .session_mut()
                .publish(&reply.topic, &reply.payload)
                .await?;
        }
        Ok(Some(dispatch))
    }

    /// Borrow the link supervisor.
    pub fn link(&self) -> &LinkSupervisor<L> {
        &self.link
    }

    /// Borrow the session supervisor.
    pub fn session(&self) -> &SessionSupervisor<M> {
        &self.session
    }

    /// Borrow the command router.
    pub fn router(&self) -> &CommandRouter<S, A> {
        &self.router
    }
}
