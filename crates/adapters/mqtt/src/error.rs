//! MQTT adapter error types.

use std::time::Duration;

use homenode_app::error::SessionError;
use rumqttc::{ConnectReturnCode, ConnectionError};

/// Errors specific to the MQTT adapter.
#[derive(Debug, thiserror::Error)]
pub enum MqttError {
    /// The session has not been opened, or was dropped after a failure.
    #[error("MQTT client not connected")]
    NotConnected,

    /// The rumqttc request channel is closed.
    #[error("MQTT client error")]
    Client(#[source] rumqttc::ClientError),

    /// The rumqttc event loop reported an error.
    #[error("MQTT connection error")]
    Connection(#[source] ConnectionError),

    /// The broker did not acknowledge the connection in time.
    #[error("no CONNACK within {0:?}")]
    ConnectTimeout(Duration),

    /// The broker acknowledged with a failure code.
    #[error("broker refused connection: {0:?}")]
    Refused(ConnectReturnCode),

    /// The event loop reconnected on its own; subscriptions are gone.
    #[error("broker session restarted")]
    Reconnected,

    /// The broker did not acknowledge a subscription in time.
    #[error("no SUBACK for {topic} within {after:?}")]
    SubAckTimeout { topic: String, after: Duration },

    /// The broker answered a subscription with a failure code.
    #[error("broker rejected subscription to {0}")]
    SubscriptionRejected(String),
}

impl MqttError {
    /// Whether this error means the connection itself is gone.
    ///
    /// rumqttc tears its network down on every event loop error, so any
    /// [`ConnectionError`] is a lost session.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        match self {
            Self::NotConnected
            | Self::Client(_)
            | Self::Connection(_)
            | Self::ConnectTimeout(_)
            | Self::Reconnected
            | Self::SubAckTimeout { .. } => true,
            Self::Refused(_) | Self::SubscriptionRejected(_) => false,
        }
    }

    /// Convert into a [`SessionError`] for propagation across the port
    /// boundary.
    #[must_use]
    pub fn into_session(self) -> SessionError {
        match self {
            Self::NotConnected => SessionError::NotConnected,
            Self::Refused(code) => SessionError::Refused(format!("{code:?}")),
            other if other.is_transport() => SessionError::Transport(Box::new(other)),
            other => SessionError::Protocol(Box::new(other)),
        }
    }
}

impl From<MqttError> for SessionError {
    fn from(err: MqttError) -> Self {
        err.into_session()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn io(kind: std::io::ErrorKind) -> MqttError {
        MqttError::Connection(ConnectionError::Io(std::io::Error::from(kind)))
    }

    #[test]
    fn should_display_not_connected_error() {
        let err = MqttError::NotConnected;
        assert_eq!(err.to_string(), "MQTT client not connected");
    }

    #[test]
    fn should_convert_not_connected_to_session_not_connected() {
        let err: SessionError = MqttError::NotConnected.into();
        assert!(matches!(err, SessionError::NotConnected));
    }

    #[test]
    fn should_classify_io_errors_as_transport() {
        let err: SessionError = io(std::io::ErrorKind::ConnectionReset).into();
        assert!(matches!(err, SessionError::Transport(_)));
        assert!(err.is_transport());
    }

    #[test]
    fn should_classify_network_timeout_as_transport() {
        let err: SessionError = MqttError::Connection(ConnectionError::NetworkTimeout).into();
        assert!(err.is_transport());
    }

    #[test]
    fn should_classify_connect_timeout_as_transport() {
        let err: SessionError = MqttError::ConnectTimeout(Duration::from_secs(10)).into();
        assert!(err.is_transport());
    }

    #[test]
    fn should_classify_self_reconnect_as_transport() {
        let err: SessionError = MqttError::Reconnected.into();
        assert!(err.is_transport());
    }

    #[test]
    fn should_treat_every_event_loop_failure_as_transport() {
        let failures = [
            ConnectionError::ConnectionRefused(ConnectReturnCode::NotAuthorized),
            ConnectionError::NotConnAck(rumqttc::Packet::PingResp),
            ConnectionError::RequestsDone,
        ];
        for failure in failures {
            let err: SessionError = MqttError::Connection(failure).into();
            assert!(matches!(err, SessionError::Transport(_)));
        }
    }

    #[test]
    fn should_classify_missing_suback_as_transport() {
        let err: SessionError = MqttError::SubAckTimeout {
            topic: "home/light".to_string(),
            after: Duration::from_secs(10),
        }
        .into();
        assert!(err.is_transport());
    }

    #[test]
    fn should_convert_rejected_subscription_to_protocol_error() {
        let err: SessionError = MqttError::SubscriptionRejected("home/ac".to_string()).into();
        assert!(matches!(err, SessionError::Protocol(_)));
        assert!(!err.is_transport());
    }

    #[test]
    fn should_convert_refusal_from_connack() {
        let err: SessionError = MqttError::Refused(ConnectReturnCode::BadUserNamePassword).into();
        assert!(matches!(err, SessionError::Refused(_)));
    }

    #[test]
    fn should_keep_mqtt_error_as_source() {
        let err: SessionError = io(std::io::ErrorKind::BrokenPipe).into();
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "MQTT connection error");
    }
}
