//! Link supervisor: brings the wireless link up and keeps retrying until it is.
//!
//! One [`attempt`](LinkSupervisor::attempt) is bounded by the attempt
//! timeout. [`ensure_link_up`](LinkSupervisor::ensure_link_up) is the only
//! retry loop and never gives up: the device has no other way back online.

use tokio::time::{Instant, sleep};
use tracing::{info, warn};

use crate::error::LinkError;
use crate::ports::{Credentials, NetworkLink};
use crate::timing::Timings;

/// Outcome of a successful attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkReady {
    /// Address assigned to the station, when the driver reports one.
    pub address: Option<String>,
}

/// Owns the network link and its retry policy.
pub struct LinkSupervisor<L> {
    link: L,
    credentials: Credentials,
    timings: Timings,
}

impl<L: NetworkLink> LinkSupervisor<L> {
    /// Create a supervisor for `link`.
    pub fn new(link: L, credentials: Credentials, timings: Timings) -> Self {
        Self {
            link,
            credentials,
            timings,
        }
    }

    /// Whether the link is currently up.
    pub fn is_up(&self) -> bool {
        self.link.is_connected()
    }

    /// Borrow the link.
    pub fn link(&self) -> &L {
        &self.link
    }

    /// Make one bounded attempt to bring the link up.
    ///
    /// Checks the link once per check interval. When the attempt window
    /// elapses, disconnects, pauses and gives up.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Timeout`] when the window elapses, or
    /// [`LinkError::Driver`] when the driver rejects the connect request.
    pub async fn attempt(&mut self) -> Result<LinkReady, LinkError> {
        self.link.activate();
        self.link
            .connect(&self.credentials.ssid, &self.credentials.password)?;

        let started = Instant::now();
        while !self.link.is_connected() {
            info!(ssid = %self.credentials.ssid, "attempting to connect to wi-fi");
            sleep(self.timings.link_check_interval).await;

            if started.elapsed() > self.timings.link_attempt_timeout {
                warn!(ssid = %self.credentials.ssid, "wi-fi connection timeout");
                self.link.disconnect();
                sleep(self.timings.link_disconnect_pause).await;
                return Err(LinkError::Timeout {
                    after: self.timings.link_attempt_timeout,
                });
            }
        }

        let address = self.link.local_address();
        info!(
            address = address.as_deref().unwrap_or("unknown"),
            "connected to wi-fi"
        );
        Ok(LinkReady { address })
    }

    /// Retry [`attempt`](Self::attempt) until the link is up.
    ///
    /// A timed-out attempt has already paused, so it is retried at once.
    /// Driver errors wait for the link retry delay first.
    pub async fn ensure_link_up(&mut self) -> LinkReady {
        loop {
            match self.attempt().await {
                Ok(ready) => return ready,
                Err(err @ LinkError::Timeout { .. }) => {
                    warn!(error = %err, "retrying wi-fi connection");
                }
                Err(err) => {
                    warn!(
                        error = %err,
                        delay_secs = self.timings.link_retry_delay.as_secs(),
                        "wi-fi connection failed, retrying"
                    );
                    sleep(self.timings.link_retry_delay).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::VecDeque;
    use std::time::Duration;

    /// Scripted station: each `connect` pops the number of checks it takes
    /// to associate (`None` never associates, `Err` is a driver failure).
    #[derive(Default)]
    struct ScriptedLink {
        script: VecDeque<Result<Option<u32>, ()>>,
        checks_left: Cell<Option<u32>>,
        connected: Cell<bool>,
        activations: u32,
        connects: u32,
        disconnects: u32,
    }

    impl ScriptedLink {
        fn with(script: Vec<Result<Option<u32>, ()>>) -> Self {
            Self {
                script: script.into(),
                ..Self::default()
            }
        }
    }

    impl NetworkLink for ScriptedLink {
        fn activate(&mut self) {
            self.activations += 1;
        }

        fn connect(&mut self, ssid: &str, _password: &str) -> Result<(), LinkError> {
            assert_eq!(ssid, "Wokwi-GUEST");
            self.connects += 1;
            match self.script.pop_front().unwrap_or(Ok(Some(0))) {
                Ok(checks) => {
                    self.checks_left.set(checks);
                    Ok(())
                }
                Err(()) => Err(LinkError::Driver(Box::new(std::io::Error::other(
                    "radio busy",
                )))),
            }
        }

        fn is_connected(&self) -> bool {
            if self.connected.get() {
                return true;
            }
            match self.checks_left.get() {
                Some(0) => {
                    self.connected.set(true);
                    true
                }
                Some(n) => {
                    self.checks_left.set(Some(n - 1));
                    false
                }
                None => false,
            }
        }

        fn disconnect(&mut self) {
            self.disconnects += 1;
            self.connected.set(false);
            self.checks_left.set(None);
        }

        fn local_address(&self) -> Option<String> {
            self.connected.get().then(|| "192.168.1.23".to_string())
        }
    }

    fn supervisor(link: ScriptedLink) -> LinkSupervisor<ScriptedLink> {
        LinkSupervisor::new(
            link,
            Credentials {
                ssid: "Wokwi-GUEST".to_string(),
                password: String::new(),
            },
            Timings::default(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn should_report_address_when_link_comes_up() {
        let mut sup = supervisor(ScriptedLink::with(vec![Ok(Some(3))]));
        let started = Instant::now();

        let ready = sup.attempt().await.unwrap();

        assert_eq!(ready.address.as_deref(), Some("192.168.1.23"));
        assert_eq!(started.elapsed(), Duration::from_secs(3));
        assert!(sup.is_up());
        assert_eq!(sup.link().activations, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn should_not_sleep_when_already_connected() {
        let mut sup = supervisor(ScriptedLink::with(vec![Ok(Some(0))]));
        let started = Instant::now();

        sup.attempt().await.unwrap();

        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn should_disconnect_and_pause_on_timeout() {
        let mut sup = supervisor(ScriptedLink::with(vec![Ok(None)]));
        let started = Instant::now();

        let err = sup.attempt().await.unwrap_err();

        assert!(matches!(err, LinkError::Timeout { after } if after == Duration::from_secs(20)));
        assert_eq!(sup.link().disconnects, 1);
        // 21 one-second checks exceed the 20 s window, then the 2 s pause.
        assert_eq!(started.elapsed(), Duration::from_secs(23));
    }

    #[tokio::test(start_paused = true)]
    async fn should_retry_immediately_after_timeout() {
        let mut sup = supervisor(ScriptedLink::with(vec![Ok(None), Ok(Some(1))]));
        let started = Instant::now();

        let ready = sup.ensure_link_up().await;

        assert!(ready.address.is_some());
        assert_eq!(sup.link().connects, 2);
        assert_eq!(started.elapsed(), Duration::from_secs(23 + 1));
    }

    #[tokio::test(start_paused = true)]
    async fn should_wait_retry_delay_after_driver_error() {
        let mut sup = supervisor(ScriptedLink::with(vec![Err(()), Err(()), Ok(Some(0))]));
        let started = Instant::now();

        sup.ensure_link_up().await;

        assert_eq!(sup.link().connects, 3);
        assert_eq!(started.elapsed(), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn should_report_link_loss() {
        let mut sup = supervisor(ScriptedLink::with(vec![Ok(Some(0))]));
        sup.ensure_link_up().await;
        assert!(sup.is_up());

        sup.link.disconnect();

        assert!(!sup.is_up());
    }
}
